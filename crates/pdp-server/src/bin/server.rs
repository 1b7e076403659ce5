//! pdp-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), overlays `PDP_*`
//! environment variables, opens the SQLite store and serves the JSON API.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use pdp_server::ServerConfig;
use pdp_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Player development plan server")]
struct Cli {
  /// TOML configuration file; missing is fine, defaults apply.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

fn init_tracing() {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();
  tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: PathBuf) -> anyhow::Result<ServerConfig> {
  let mut cfg: ServerConfig = config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("PDP"))
    .build()
    .context("failed to read configuration")?
    .try_deserialize()
    .context("invalid server configuration")?;
  cfg.store_path = home_relative(&cfg.store_path);
  Ok(cfg)
}

/// Resolve a leading `~/` against `$HOME`.
fn home_relative(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), std::env::var_os("HOME")) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  init_tracing();
  let cfg = load_config(Cli::parse().config)?;

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {}", cfg.store_path.display()))?;

  let address = cfg.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!(%address, store = %cfg.store_path.display(), "serving pdp api");

  axum::serve(listener, pdp_server::app(Arc::new(store)))
    .await
    .context("server error")
}
