//! JSON API for the RSVP backend.
//!
//! Exposes an axum [`Router`] backed by a [`ResponseService`] over any
//! [`RecordStore`]. CORS, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = rsvp_api::api_router(Arc::new(ResponseService::new(store)));
//! ```

pub mod error;
pub mod rsvps;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{get, post},
};
use rsvp_core::{
  service::{Clock, ResponseService},
  store::RecordStore,
};
use serde_json::{Value, json};

pub use error::ApiError;

/// Build the API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, C>(service: Arc<ResponseService<S, C>>) -> Router<()>
where
  S: RecordStore + 'static,
  C: Clock + 'static,
{
  Router::new()
    .route("/health", get(health))
    .route("/rsvp", post(rsvps::submit::<S, C>))
    .route("/rsvps", get(rsvps::list::<S, C>))
    .route("/rsvps/view", get(rsvps::view::<S, C>))
    .with_state(service)
}

/// `GET /health`
async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }

#[cfg(test)]
mod tests;
