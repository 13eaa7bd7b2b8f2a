//! Error type for `contactos-store-sqlite`.

use contactos_core::DomainError;
use rusqlite::{ErrorCode, ffi};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] contactos_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(rusqlite::Error),

  /// A stored value could not be mapped back into a domain type.
  #[error("decode error: {0}")]
  Decode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Constraint violations are caller mistakes (400), not storage faults.
impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self {
    match &e {
      rusqlite::Error::SqliteFailure(f, msg)
        if f.code == ErrorCode::ConstraintViolation =>
      {
        let msg = msg.clone().unwrap_or_else(|| f.to_string());
        Error::Core(contactos_core::Error::Validation(msg))
      }
      _ => Error::Sqlite(e),
    }
  }
}

impl DomainError for Error {
  fn domain(&self) -> Option<&contactos_core::Error> {
    match self {
      Error::Core(e) => Some(e),
      _ => None,
    }
  }
}

/// `true` if `e` is a UNIQUE violation on `column` (e.g. `"contacto.email"`).
pub(crate) fn is_unique_violation(e: &rusqlite::Error, column: &str) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, Some(msg))
      if f.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE && msg.contains(column)
  )
}
