//! SQLite backend for the contact directory.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every request borrows that connection
//! for the duration of one closure; multi-statement writes run in a single
//! transaction inside that closure.

mod encode;
mod schema;
mod store;
mod upsert;
mod write;

pub mod error;

pub use error::{Error, Result};
pub use store::{Location, SqliteStore};

#[cfg(test)]
mod tests;
