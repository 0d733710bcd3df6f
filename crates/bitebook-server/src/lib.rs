//! Bitebook HTTP server.
//!
//! Loads [`ServerConfig`], opens the SQLite store and wraps the API router
//! in the tracing and CORS layers. The binary in `main.rs` is a thin shell
//! over [`app`] and [`ServerConfig::load`].

use std::{
  num::NonZeroUsize,
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use bitebook_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Prefix for environment overrides, e.g. `BITEBOOK_PORT=8080`.
pub const ENV_PREFIX: &str = "BITEBOOK";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub pool_size:  NonZeroUsize,
}

impl ServerConfig {
  /// Layer defaults, then the TOML file at `path` (if it exists), then
  /// `BITEBOOK_*` environment variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 3000_i64)?
      .set_default("store_path", "bitebook.db")?
      .set_default("pool_size", 4_i64)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
      .build()?
      .try_deserialize()
  }

  /// `host:port`, ready for [`tokio::net::TcpListener::bind`].
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Application ──────────────────────────────────────────────────────────────

/// The full application: both API verticals plus request tracing and
/// permissive CORS for a UI served from another origin.
pub fn app(store: Arc<SqliteStore>) -> Router {
  bitebook_api::api_router(store)
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests;
