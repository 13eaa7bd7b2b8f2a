//! Core types and trait definitions for the contact directory.
//!
//! No HTTP or database dependencies live here. The storage and API crates
//! both depend on it.

#![allow(async_fn_in_trait)]

pub mod contacto;
pub mod error;
pub mod reference;
pub mod store;
pub mod validate;

pub use error::{DomainError, Error, Result};
