//! contactos server binary.
//!
//! Reads `contactos.toml` (or the path given with `--config`), applies `APP_*`
//! environment overrides, opens the SQLite store and serves the JSON API.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use contactos_server::ServerConfig;
use contactos_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Contact directory REST server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "contactos.toml")]
  config: PathBuf,

  /// Database URL, overriding the config file and `APP_DB_URL`.
  #[arg(long)]
  db_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  if let Some(db_url) = cli.db_url {
    cfg.db_url = db_url;
  }

  let store = SqliteStore::connect(&cfg.db_url)
    .await
    .with_context(|| format!("failed to open store at {}", cfg.db_url))?;

  let address = cfg.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!(db_url = %cfg.db_url, "Listening on http://{address}");

  axum::serve(listener, contactos_server::app(store))
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("shut down");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for ctrl-c");
  }
}
