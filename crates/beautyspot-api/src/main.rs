//! beautyspot-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! file-backed session storage, restores any persisted session, and serves
//! the console API over HTTP. The restore completes before the listener
//! binds, so no request ever observes a half-initialised session.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use beautyspot_api::{AppState, router};
use beautyspot_core::{directory::AccountDirectory, session::SessionStore};
use beautyspot_store_file::FileStorage;
use clap::Parser;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "BeautySpot console session server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Runtime server configuration, deserialised from `config.toml` with
/// `BSPOT_*` environment overrides.
#[derive(Deserialize, Clone)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host:     String,
  #[serde(default = "default_port")]
  port:     u16,
  /// Directory holding `session.json`.
  #[serde(default = "default_data_dir")]
  data_dir: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 4173 }

fn default_data_dir() -> PathBuf { PathBuf::from("./data") }

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("BSPOT"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in the data directory.
  let data_dir = expand_tilde(&server_cfg.data_dir);

  // Build the session store and restore any persisted session before
  // anything can evaluate the guard.
  let storage = FileStorage::new(data_dir);
  let mut store = SessionStore::new(storage, AccountDirectory::mock());
  store.restore().await;

  let state = AppState::new(store);
  let app = router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
