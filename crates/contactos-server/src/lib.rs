//! Process wiring for the contact directory server: configuration loading and
//! the top-level HTTP application.

use std::{path::Path, sync::Arc};

use axum::Router;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use contactos_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Prefix of the environment variables read into [`ServerConfig`],
/// e.g. `APP_DB_URL` or `APP_PORT`.
pub const ENV_PREFIX: &str = "APP";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Later sources win: built-in defaults, then the TOML file, then `APP_*`
/// environment variables. The `--db-url` flag is applied on top by the binary.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:   String,
  pub port:   u16,
  pub db_url: String,
}

impl ServerConfig {
  /// Load from an optional TOML file at `path` and the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::from_builder(
      defaults()?
        .add_source(File::from(path).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX)),
    )
  }

  fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, config::ConfigError> {
    builder.build()?.try_deserialize()
  }

  pub fn address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
  Config::builder()
    .set_default("host", "0.0.0.0")?
    .set_default("port", 8000)?
    .set_default("db_url", "sqlite://contactos.db")
}

// ─── Application ──────────────────────────────────────────────────────────────

/// The API router with request tracing.
pub fn app(store: SqliteStore) -> Router {
  contactos_api::api_router(Arc::new(store)).layer(TraceLayer::new_for_http())
}
