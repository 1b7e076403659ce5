//! HTTP server wiring for the development-plan API.
//!
//! Mounts [`pdp_api::api_router`] under `/api`, adds a liveness probe, and
//! wraps everything in request tracing. The binary in `src/bin/server.rs`
//! handles configuration and the listener.

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use pdp_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PDP_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       5233,
      store_path: PathBuf::from("pdp.sqlite3"),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router over an opened store.
pub fn app(store: Arc<SqliteStore>) -> Router {
  Router::new()
    .route("/healthz", get(|| async { "ok" }))
    .nest("/api", pdp_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}
