//! Natural-key upserts and single-row helpers.
//!
//! Every function takes a plain [`Connection`] so it can run either directly
//! or inside a [`rusqlite::Transaction`] (which derefs to one). Each upsert is
//! a single `INSERT … ON CONFLICT … RETURNING` statement; the UNIQUE
//! constraints in [`crate::schema`] decide which row wins.

use contactos_core::{
  contacto::{ContactoView, Direccion, Telefono, TipoTelefono},
  reference::{Ciudad, Estado, NewEstado},
};
use rusqlite::{Connection, OptionalExtension as _, params};

use crate::{
  Result,
  encode::{CONTACTO_COLUMNS, RawContacto, direccion_row, estado_row},
};

// ─── States ──────────────────────────────────────────────────────────────────

/// Insert a state, or refresh the name of the existing one. A missing name
/// never clears a stored one.
pub fn estado(conn: &Connection, input: &NewEstado) -> Result<Estado> {
  let estado = conn.query_row(
    "INSERT INTO estado (codigo, nombre) VALUES (?1, ?2)
     ON CONFLICT (codigo) DO UPDATE
       SET nombre = COALESCE(excluded.nombre, estado.nombre)
     RETURNING estado_id, codigo, nombre",
    params![input.codigo, input.nombre],
    estado_row,
  )?;
  tracing::debug!(codigo = %estado.codigo, id = estado.estado_id, "upserted estado");
  Ok(estado)
}

/// Resolve a state code to its id. States are never created implicitly.
pub fn estado_id(conn: &Connection, codigo: &str) -> Result<i64> {
  conn
    .query_row(
      "SELECT estado_id FROM estado WHERE codigo = ?1",
      params![codigo],
      |r| r.get(0),
    )
    .optional()?
    .ok_or_else(|| {
      contactos_core::Error::not_found(format!("estado {codigo} does not exist"))
        .into()
    })
}

// ─── Cities ──────────────────────────────────────────────────────────────────

pub fn ciudad_id(conn: &Connection, nombre: &str, estado_id: i64) -> Result<i64> {
  let id = conn.query_row(
    "INSERT INTO ciudad (nombre, estado_id) VALUES (?1, ?2)
     ON CONFLICT (nombre, estado_id) DO UPDATE SET nombre = excluded.nombre
     RETURNING ciudad_id",
    params![nombre, estado_id],
    |r| r.get(0),
  )?;
  tracing::debug!(%nombre, estado_id, id, "upserted ciudad");
  Ok(id)
}

pub fn ciudad_by_id(conn: &Connection, id: i64) -> Result<Option<Ciudad>> {
  Ok(
    conn
      .query_row(
        "SELECT ci.ciudad_id, ci.nombre, es.codigo
         FROM ciudad ci
         JOIN estado es ON es.estado_id = ci.estado_id
         WHERE ci.ciudad_id = ?1",
        params![id],
        crate::encode::ciudad_row,
      )
      .optional()?,
  )
}

/// Resolve the city of an address: the state must exist, the city is
/// upserted under it. An address with only a state stores no city.
pub fn resolve_ciudad(conn: &Connection, dir: &Direccion) -> Result<Option<i64>> {
  match (dir.ciudad.as_deref(), dir.estado.as_deref()) {
    (Some(ciudad), Some(codigo)) => {
      let estado_id = estado_id(conn, codigo)?;
      Ok(Some(ciudad_id(conn, ciudad, estado_id)?))
    }
    (None, Some(codigo)) => {
      estado_id(conn, codigo)?;
      Ok(None)
    }
    (Some(_), None) => {
      Err(contactos_core::Error::validation("ciudad requires estado").into())
    }
    (None, None) => Ok(None),
  }
}

// ─── Companies & departments ─────────────────────────────────────────────────

/// Upsert into a `(<table>_id, nombre UNIQUE)` catalog table.
pub fn named(conn: &Connection, table: &'static str, nombre: &str) -> Result<(i64, String)> {
  let row = conn.query_row(
    &format!(
      "INSERT INTO {table} (nombre) VALUES (?1)
       ON CONFLICT (nombre) DO UPDATE SET nombre = excluded.nombre
       RETURNING {table}_id, nombre"
    ),
    params![nombre],
    |r| Ok((r.get(0)?, r.get(1)?)),
  )?;
  tracing::debug!(table, %nombre, id = row.0, "upserted catalog row");
  Ok(row)
}

/// Optional reference: `None` in, `None` out.
pub fn named_id(
  conn: &Connection,
  table: &'static str,
  nombre: Option<&str>,
) -> Result<Option<i64>> {
  nombre
    .map(|n| named(conn, table, n).map(|(id, _)| id))
    .transpose()
}

/// Rename a catalog row. `None` if `id` is unknown.
pub fn rename(
  conn: &Connection,
  table: &'static str,
  id: i64,
  nombre: &str,
) -> Result<Option<(i64, String)>> {
  Ok(
    conn
      .query_row(
        &format!(
          "UPDATE {table} SET nombre = ?2 WHERE {table}_id = ?1
           RETURNING {table}_id, nombre"
        ),
        params![id, nombre],
        |r| Ok((r.get(0)?, r.get(1)?)),
      )
      .optional()?,
  )
}

// ─── Contacts ────────────────────────────────────────────────────────────────

pub fn contacto_id(conn: &Connection, email: &str) -> Result<Option<i64>> {
  Ok(
    conn
      .query_row(
        "SELECT contacto_id FROM contacto WHERE email = ?1",
        params![email],
        |r| r.get(0),
      )
      .optional()?,
  )
}

/// Like [`contacto_id`] but a missing contact is an error.
pub fn require_contacto(conn: &Connection, email: &str) -> Result<i64> {
  contacto_id(conn, email)?.ok_or_else(|| {
    contactos_core::Error::not_found(format!("contacto {email} does not exist"))
      .into()
  })
}

pub fn contacto_view(conn: &Connection, email: &str) -> Result<Option<ContactoView>> {
  let raw = conn
    .query_row(
      &format!("SELECT {CONTACTO_COLUMNS} FROM contacto_vista WHERE email = ?1"),
      params![email],
      RawContacto::from_row,
    )
    .optional()?;
  raw.map(RawContacto::into_view).transpose()
}

// ─── Addresses ───────────────────────────────────────────────────────────────

/// Insert or overwrite the single address row of a contact.
pub fn direccion(
  conn: &Connection,
  contacto_id: i64,
  ciudad_id: Option<i64>,
  dir: &Direccion,
) -> Result<()> {
  conn.execute(
    "INSERT INTO direccion (contacto_id, ciudad_id, address, zip)
     VALUES (?1, ?2, ?3, ?4)
     ON CONFLICT (contacto_id) DO UPDATE
       SET ciudad_id = excluded.ciudad_id,
           address   = excluded.address,
           zip       = excluded.zip",
    params![contacto_id, ciudad_id, dir.address, dir.zip],
  )?;
  Ok(())
}

pub fn delete_direccion(conn: &Connection, contacto_id: i64) -> Result<()> {
  conn.execute(
    "DELETE FROM direccion WHERE contacto_id = ?1",
    params![contacto_id],
  )?;
  Ok(())
}

pub fn direccion_view(conn: &Connection, contacto_id: i64) -> Result<Direccion> {
  Ok(
    conn
      .query_row(
        "SELECT di.address, di.zip, ci.nombre, es.codigo
         FROM direccion di
         LEFT JOIN ciudad ci ON ci.ciudad_id = di.ciudad_id
         LEFT JOIN estado es ON es.estado_id = ci.estado_id
         WHERE di.contacto_id = ?1",
        params![contacto_id],
        direccion_row,
      )
      .optional()?
      .unwrap_or_default(),
  )
}

// ─── Phones ──────────────────────────────────────────────────────────────────

/// Insert or overwrite the phone in one slot.
pub fn telefono(
  conn: &Connection,
  contacto_id: i64,
  tipo: TipoTelefono,
  numero: &str,
) -> Result<Telefono> {
  conn.execute(
    "INSERT INTO telefono (contacto_id, tipo, numero) VALUES (?1, ?2, ?3)
     ON CONFLICT (contacto_id, tipo) DO UPDATE SET numero = excluded.numero",
    params![contacto_id, tipo.as_str(), numero],
  )?;
  Ok(Telefono { tipo, numero: numero.to_owned() })
}

pub fn delete_telefonos(conn: &Connection, contacto_id: i64) -> Result<usize> {
  Ok(conn.execute(
    "DELETE FROM telefono WHERE contacto_id = ?1",
    params![contacto_id],
  )?)
}
