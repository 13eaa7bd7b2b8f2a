//! Error types for `contactos-core`.

use thiserror::Error;

/// Domain failures shared by every layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// A malformed field or a violated constraint.
  #[error("validation error: {0}")]
  Validation(String),

  /// A referenced contact, state, company, etc. does not exist.
  #[error("not found: {0}")]
  NotFound(String),

  /// A contact with the same e-mail already exists.
  #[error("conflict: {0}")]
  Conflict(String),
}

impl Error {
  pub fn validation(msg: impl Into<String>) -> Self {
    Self::Validation(msg.into())
  }

  pub fn not_found(msg: impl Into<String>) -> Self { Self::NotFound(msg.into()) }
}

/// Implemented by backend error types so callers can tell domain failures
/// apart from storage faults without knowing the backend.
pub trait DomainError {
  /// The domain error carried by `self`, or `None` for a storage fault.
  fn domain(&self) -> Option<&Error>;
}

impl DomainError for Error {
  fn domain(&self) -> Option<&Error> { Some(self) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
