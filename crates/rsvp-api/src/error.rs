//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The client sent something it can fix and resubmit.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The record store failed. `message` is what the client sees; the source
  /// is only logged.
  #[error("{message}: {source}")]
  Store {
    message: &'static str,
    #[source]
    source:  rsvp_core::Error,
  },
}

impl ApiError {
  /// Classify a service error, using `message` as the client-facing text for
  /// storage failures.
  pub fn from_service(err: rsvp_core::Error, message: &'static str) -> Self {
    match err {
      rsvp_core::Error::ValidationFailed(_) => ApiError::BadRequest(err.to_string()),
      source @ rsvp_core::Error::StorageUnavailable(_) => ApiError::Store { message, source },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store { message, source } => {
        tracing::error!("{message}: {source}");
        (StatusCode::INTERNAL_SERVER_ERROR, (*message).to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
