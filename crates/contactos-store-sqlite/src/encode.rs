//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Phone slots are stored as their
//! lower-case names (`principal`, `alterno`).

use chrono::{DateTime, Utc};
use contactos_core::{
  contacto::{ContactoView, Direccion, Telefono, TipoTelefono},
  reference::{Ciudad, Departamento, Empresa, Estado},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {s:?}: {e}")))
}

// ─── TipoTelefono ────────────────────────────────────────────────────────────

pub fn decode_tipo(s: &str) -> Result<TipoTelefono> {
  s.parse()
    .map_err(|_| Error::Decode(format!("unknown phone slot: {s:?}")))
}

// ─── Reference rows ──────────────────────────────────────────────────────────

/// Columns: `estado_id, codigo, nombre`.
pub fn estado_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Estado> {
  Ok(Estado {
    estado_id: row.get(0)?,
    codigo:    row.get(1)?,
    nombre:    row.get(2)?,
  })
}

/// Columns: `ciudad_id, nombre, estado_codigo`.
pub fn ciudad_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Ciudad> {
  Ok(Ciudad {
    ciudad_id:     row.get(0)?,
    nombre:        row.get(1)?,
    estado_codigo: row.get(2)?,
  })
}

pub fn empresa_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Empresa> {
  Ok(Empresa { empresa_id: row.get(0)?, nombre: row.get(1)? })
}

pub fn departamento_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<Departamento> {
  Ok(Departamento { departamento_id: row.get(0)?, nombre: row.get(1)? })
}

/// Columns: `address, zip, ciudad, estado`.
pub fn direccion_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Direccion> {
  Ok(Direccion {
    address: row.get(0)?,
    zip:     row.get(1)?,
    ciudad:  row.get(2)?,
    estado:  row.get(3)?,
  })
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// Raw values read from a `telefono` row.
pub struct RawTelefono {
  pub tipo:   String,
  pub numero: String,
}

impl RawTelefono {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { tipo: row.get(0)?, numero: row.get(1)? })
  }

  pub fn into_telefono(self) -> Result<Telefono> {
    Ok(Telefono { tipo: decode_tipo(&self.tipo)?, numero: self.numero })
  }
}

/// Select list matching [`RawContacto::from_row`].
pub const CONTACTO_COLUMNS: &str = "contacto_id, first_name, last_name, email,
  empresa, departamento, address, zip, ciudad, estado, phone1, phone2,
  creado_en, actualizado_en";

/// Raw values read from the `contacto_vista` view.
pub struct RawContacto {
  pub contacto_id:    i64,
  pub first_name:     String,
  pub last_name:      String,
  pub email:          String,
  pub empresa:        Option<String>,
  pub departamento:   Option<String>,
  pub address:        Option<String>,
  pub zip:            Option<String>,
  pub ciudad:         Option<String>,
  pub estado:         Option<String>,
  pub phone1:         Option<String>,
  pub phone2:         Option<String>,
  pub creado_en:      String,
  pub actualizado_en: String,
}

impl RawContacto {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      contacto_id:    row.get(0)?,
      first_name:     row.get(1)?,
      last_name:      row.get(2)?,
      email:          row.get(3)?,
      empresa:        row.get(4)?,
      departamento:   row.get(5)?,
      address:        row.get(6)?,
      zip:            row.get(7)?,
      ciudad:         row.get(8)?,
      estado:         row.get(9)?,
      phone1:         row.get(10)?,
      phone2:         row.get(11)?,
      creado_en:      row.get(12)?,
      actualizado_en: row.get(13)?,
    })
  }

  pub fn into_view(self) -> Result<ContactoView> {
    Ok(ContactoView {
      contacto_id:    self.contacto_id,
      first_name:     self.first_name,
      last_name:      self.last_name,
      email:          self.email,
      empresa:        self.empresa,
      departamento:   self.departamento,
      address:        self.address,
      zip:            self.zip,
      ciudad:         self.ciudad,
      estado:         self.estado,
      phone1:         self.phone1,
      phone2:         self.phone2,
      creado_en:      decode_dt(&self.creado_en)?,
      actualizado_en: decode_dt(&self.actualizado_en)?,
    })
  }
}
