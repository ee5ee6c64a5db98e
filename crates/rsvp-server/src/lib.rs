//! HTTP server assembly for the RSVP backend.
//!
//! Wraps the [`rsvp_api`] router with CORS and request tracing and loads the
//! runtime [`ServerConfig`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use axum::{
  Router,
  http::{Method, header},
};
use rsvp_core::{
  service::{Clock, ResponseService},
  store::RecordStore,
};
use serde::Deserialize;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, read from `config.toml` and `RSVP_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

/// Load [`ServerConfig`] from the optional TOML file at `path`, overridden by
/// `RSVP_HOST`, `RSVP_PORT` and `RSVP_STORE_PATH`.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "rsvp.db")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("RSVP"))
    .build()?
    .try_deserialize()
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

// ─── Router ───────────────────────────────────────────────────────────────────

/// CORS policy for browser clients: any origin, JSON bodies, 10-minute
/// preflight cache.
pub fn cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    .allow_methods([
      Method::GET,
      Method::POST,
      Method::PUT,
      Method::DELETE,
      Method::OPTIONS,
    ])
    .expose_headers([header::CONTENT_LENGTH])
    .max_age(Duration::from_secs(600))
}

/// Build the full application router for `service`.
pub fn router<S, C>(service: Arc<ResponseService<S, C>>) -> Router
where
  S: RecordStore + 'static,
  C: Clock + 'static,
{
  rsvp_api::api_router(service)
    .layer(cors_layer())
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
