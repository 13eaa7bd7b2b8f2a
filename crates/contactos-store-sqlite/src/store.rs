//! [`SqliteStore`]: the SQLite implementation of [`DirectoryStore`].

use std::path::{Path, PathBuf};

use contactos_core::{
  contacto::{
    ContactoInput, ContactoView, Direccion, DireccionInput, Page, Telefono,
    TelefonoInput,
  },
  reference::{Ciudad, Departamento, Empresa, Estado, NewCiudad, NewEstado},
  store::DirectoryStore,
  validate,
};
use rusqlite::params;

use crate::{
  Error, Result,
  encode::{
    CONTACTO_COLUMNS, RawContacto, RawTelefono, ciudad_row, departamento_row,
    empresa_row, estado_row,
  },
  schema::SCHEMA,
  upsert, write,
};

// ─── Location ────────────────────────────────────────────────────────────────

/// Where a database URL points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
  Memory,
  File(PathBuf),
}

impl Location {
  /// Accepts `sqlite::memory:`, `:memory:`, `sqlite://<path>`,
  /// `sqlite:<path>` or a bare path.
  pub fn parse(url: &str) -> Self {
    let url = url.trim();
    let rest = url
      .strip_prefix("sqlite://")
      .or_else(|| url.strip_prefix("sqlite:"))
      .unwrap_or(url);
    match rest {
      ":memory:" | "" => Location::Memory,
      path => Location::File(PathBuf::from(path)),
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact directory backed by a single SQLite database.
///
/// Clones share one background connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open the database named by a connection URL (see [`Location::parse`]).
  pub async fn connect(url: &str) -> Result<Self> {
    match Location::parse(url) {
      Location::Memory => Self::open_in_memory().await,
      Location::File(path) => Self::open(path).await,
    }
  }

  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `f` on the connection thread, keeping its domain errors intact.
  async fn with_conn<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&mut rusqlite::Connection) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    self.conn.call(move |conn| Ok(f(conn))).await?
  }
}

// ─── DirectoryStore impl ─────────────────────────────────────────────────────

impl DirectoryStore for SqliteStore {
  type Error = Error;

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── States ────────────────────────────────────────────────────────────────

  async fn list_estados(&self) -> Result<Vec<Estado>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn
            .prepare("SELECT estado_id, codigo, nombre FROM estado ORDER BY codigo")?;
          let rows = stmt
            .query_map([], estado_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn upsert_estado(&self, input: NewEstado) -> Result<Estado> {
    let input = input.normalize()?;
    self.with_conn(move |conn| upsert::estado(conn, &input)).await
  }

  async fn update_estado(
    &self,
    codigo: String,
    nombre: String,
  ) -> Result<Option<Estado>> {
    let codigo = validate::codigo(&codigo)?;
    let nombre = validate::required("nombre", &nombre)?;
    self
      .with_conn(move |conn| {
        use rusqlite::OptionalExtension as _;
        Ok(
          conn
            .query_row(
              "UPDATE estado SET nombre = ?2 WHERE codigo = ?1
               RETURNING estado_id, codigo, nombre",
              params![codigo, nombre],
              estado_row,
            )
            .optional()?,
        )
      })
      .await
  }

  // ── Cities ────────────────────────────────────────────────────────────────

  async fn list_ciudades(&self, estado: Option<String>) -> Result<Vec<Ciudad>> {
    let estado = validate::optional_codigo(estado)?;

    Ok(
      self
        .conn
        .call(move |conn| {
          let rows = if let Some(codigo) = estado {
            let mut stmt = conn.prepare(
              "SELECT ci.ciudad_id, ci.nombre, es.codigo
               FROM ciudad ci
               JOIN estado es ON es.estado_id = ci.estado_id
               WHERE es.codigo = ?1
               ORDER BY ci.nombre",
            )?;
            stmt
              .query_map(params![codigo], ciudad_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?
          } else {
            let mut stmt = conn.prepare(
              "SELECT ci.ciudad_id, ci.nombre, es.codigo
               FROM ciudad ci
               JOIN estado es ON es.estado_id = ci.estado_id
               ORDER BY es.codigo, ci.nombre",
            )?;
            stmt
              .query_map([], ciudad_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?
          };
          Ok(rows)
        })
        .await?,
    )
  }

  async fn upsert_ciudad(&self, input: NewCiudad) -> Result<Ciudad> {
    let input = input.normalize()?;
    self
      .with_conn(move |conn| {
        let estado_id = upsert::estado_id(conn, &input.estado_codigo)?;
        let id = upsert::ciudad_id(conn, &input.nombre, estado_id)?;
        upsert::ciudad_by_id(conn, id)?
          .ok_or_else(|| Error::Decode(format!("ciudad {id} vanished after upsert")))
      })
      .await
  }

  async fn update_ciudad(&self, id: i64, input: NewCiudad) -> Result<Option<Ciudad>> {
    let input = input.normalize()?;
    self
      .with_conn(move |conn| {
        let tx = conn.transaction()?;
        let estado_id = upsert::estado_id(&tx, &input.estado_codigo)?;
        let updated = tx.execute(
          "UPDATE ciudad SET nombre = ?2, estado_id = ?3 WHERE ciudad_id = ?1",
          params![id, input.nombre, estado_id],
        )?;
        if updated == 0 {
          return Ok(None);
        }
        let ciudad = upsert::ciudad_by_id(&tx, id)?;
        tx.commit()?;
        Ok(ciudad)
      })
      .await
  }

  // ── Companies ─────────────────────────────────────────────────────────────

  async fn list_empresas(&self) -> Result<Vec<Empresa>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn
            .prepare("SELECT empresa_id, nombre FROM empresa ORDER BY nombre")?;
          let rows = stmt
            .query_map([], empresa_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn upsert_empresa(&self, nombre: String) -> Result<Empresa> {
    let nombre = validate::required("nombre", &nombre)?;
    let (empresa_id, nombre) = self
      .with_conn(move |conn| upsert::named(conn, "empresa", &nombre))
      .await?;
    Ok(Empresa { empresa_id, nombre })
  }

  async fn update_empresa(&self, id: i64, nombre: String) -> Result<Option<Empresa>> {
    let nombre = validate::required("nombre", &nombre)?;
    let renamed = self
      .with_conn(move |conn| upsert::rename(conn, "empresa", id, &nombre))
      .await?;
    Ok(renamed.map(|(empresa_id, nombre)| Empresa { empresa_id, nombre }))
  }

  // ── Departments ───────────────────────────────────────────────────────────

  async fn list_departamentos(&self) -> Result<Vec<Departamento>> {
    Ok(
      self
        .conn
        .call(|conn| {
          let mut stmt = conn.prepare(
            "SELECT departamento_id, nombre FROM departamento ORDER BY nombre",
          )?;
          let rows = stmt
            .query_map([], departamento_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }

  async fn upsert_departamento(&self, nombre: String) -> Result<Departamento> {
    let nombre = validate::required("nombre", &nombre)?;
    let (departamento_id, nombre) = self
      .with_conn(move |conn| upsert::named(conn, "departamento", &nombre))
      .await?;
    Ok(Departamento { departamento_id, nombre })
  }

  async fn update_departamento(
    &self,
    id: i64,
    nombre: String,
  ) -> Result<Option<Departamento>> {
    let nombre = validate::required("nombre", &nombre)?;
    let renamed = self
      .with_conn(move |conn| upsert::rename(conn, "departamento", id, &nombre))
      .await?;
    Ok(renamed.map(|(departamento_id, nombre)| Departamento { departamento_id, nombre }))
  }

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn list_contactos(&self, page: Page) -> Result<Vec<ContactoView>> {
    let raws: Vec<RawContacto> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTACTO_COLUMNS} FROM contacto_vista
           ORDER BY contacto_id
           LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt
          .query_map(params![page.limit, page.offset], RawContacto::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContacto::into_view).collect()
  }

  async fn get_contacto(&self, email: String) -> Result<Option<ContactoView>> {
    let email = validate::email(&email)?;
    self
      .with_conn(move |conn| upsert::contacto_view(conn, &email))
      .await
  }

  async fn create_contacto(&self, input: ContactoInput) -> Result<ContactoView> {
    let input = input.normalize()?;
    self
      .with_conn(move |conn| write::create_contacto(conn, &input))
      .await
  }

  async fn update_contacto(
    &self,
    email: String,
    input: ContactoInput,
  ) -> Result<ContactoView> {
    let email = validate::email(&email)?;
    let input = input.normalize()?;
    self
      .with_conn(move |conn| write::update_contacto(conn, &email, &input))
      .await
  }

  // ── Addresses & phones ────────────────────────────────────────────────────

  async fn get_direccion(&self, email: String) -> Result<Option<Direccion>> {
    let email = validate::email(&email)?;
    self
      .with_conn(move |conn| {
        upsert::contacto_id(conn, &email)?
          .map(|id| upsert::direccion_view(conn, id))
          .transpose()
      })
      .await
  }

  async fn upsert_direccion(&self, input: DireccionInput) -> Result<Direccion> {
    let input = input.normalize()?;
    self
      .with_conn(move |conn| {
        let tx = conn.transaction()?;
        let contacto_id = upsert::require_contacto(&tx, &input.email)?;
        let ciudad_id = upsert::resolve_ciudad(&tx, &input.fields)?;
        upsert::direccion(&tx, contacto_id, ciudad_id, &input.fields)?;
        let view = upsert::direccion_view(&tx, contacto_id)?;
        tx.commit()?;
        tracing::debug!(email = %input.email, "upserted direccion");
        Ok(view)
      })
      .await
  }

  async fn list_telefonos(&self, email: String) -> Result<Option<Vec<Telefono>>> {
    let email = validate::email(&email)?;
    let raws: Option<Vec<RawTelefono>> = self
      .with_conn(move |conn| {
        let Some(contacto_id) = upsert::contacto_id(conn, &email)? else {
          return Ok(None);
        };
        let mut stmt = conn.prepare(
          "SELECT tipo, numero FROM telefono
           WHERE contacto_id = ?1
           ORDER BY tipo",
        )?;
        let rows = stmt
          .query_map(params![contacto_id], RawTelefono::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Some(rows))
      })
      .await?;

    raws
      .map(|rows| rows.into_iter().map(RawTelefono::into_telefono).collect())
      .transpose()
  }

  async fn upsert_telefono(&self, input: TelefonoInput) -> Result<Telefono> {
    let input = input.normalize()?;
    self
      .with_conn(move |conn| {
        let contacto_id = upsert::require_contacto(conn, &input.email)?;
        let telefono = upsert::telefono(conn, contacto_id, input.tipo, &input.numero)?;
        tracing::debug!(email = %input.email, tipo = %input.tipo, "upserted telefono");
        Ok(telefono)
      })
      .await
  }
}
