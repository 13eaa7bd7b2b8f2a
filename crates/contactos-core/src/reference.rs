//! Reference data: lookup rows deduplicated by natural key.
//!
//! | Entity | Natural key |
//! |--------|-------------|
//! | [`Estado`] | `codigo` (upper-case, two letters) |
//! | [`Ciudad`] | `(nombre, estado)` |
//! | [`Empresa`] | `nombre` |
//! | [`Departamento`] | `nombre` |

use serde::{Deserialize, Serialize};

use crate::{Result, validate};

// ─── Estado ──────────────────────────────────────────────────────────────────

/// A state, identified externally by its two-letter code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estado {
  pub estado_id: i64,
  pub codigo:    String,
  pub nombre:    Option<String>,
}

/// Input to [`crate::store::DirectoryStore::upsert_estado`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewEstado {
  pub codigo: String,
  #[serde(default)]
  pub nombre: Option<String>,
}

impl NewEstado {
  pub fn normalize(self) -> Result<Self> {
    Ok(Self {
      codigo: validate::codigo(&self.codigo)?,
      nombre: validate::optional(self.nombre),
    })
  }
}

// ─── Ciudad ──────────────────────────────────────────────────────────────────

/// A city. Always belongs to exactly one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciudad {
  pub ciudad_id:     i64,
  pub nombre:        String,
  pub estado_codigo: String,
}

/// Input to [`crate::store::DirectoryStore::upsert_ciudad`]. The state must
/// already exist; it is never created implicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCiudad {
  pub nombre:        String,
  pub estado_codigo: String,
}

impl NewCiudad {
  pub fn normalize(self) -> Result<Self> {
    Ok(Self {
      nombre:        validate::required("nombre", &self.nombre)?,
      estado_codigo: validate::codigo(&self.estado_codigo)?,
    })
  }
}

// ─── Empresa / Departamento ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empresa {
  pub empresa_id: i64,
  pub nombre:     String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departamento {
  pub departamento_id: i64,
  pub nombre:          String,
}
