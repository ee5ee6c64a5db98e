//! Handlers for RSVP endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/rsvp` | Body: [`Submission`]; 400 on missing fields |
//! | `GET`  | `/rsvps` | Full collection, unfiltered |
//! | `GET`  | `/rsvps/view` | `?search`, `?filter=all\|attending\|declining`, `?sort=latest\|oldest\|name` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{DateTime, Utc};
use rsvp_core::{
  record::{RsvpRecord, Submission},
  service::{Clock, ResponseService},
  store::RecordStore,
  view::{RsvpView, Summary, ViewParams},
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const SAVE_FAILED: &str = "Failed to save RSVP";
const FETCH_FAILED: &str = "Failed to fetch RSVPs";

// ─── Submit ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
  pub success:      bool,
  pub message:      String,
  pub submitted_at: DateTime<Utc>,
}

/// `POST /rsvp` — body: `{"name","email","guests","attending","dietary","message"}`
pub async fn submit<S, C>(
  State(service): State<Arc<ResponseService<S, C>>>,
  Json(body): Json<Submission>,
) -> Result<Json<SubmitResponse>, ApiError>
where
  S: RecordStore,
  C: Clock,
{
  let ack = service
    .submit(body)
    .await
    .map_err(|e| ApiError::from_service(e, SAVE_FAILED))?;
  Ok(Json(SubmitResponse {
    success:      true,
    message:      "RSVP submitted successfully".to_owned(),
    submitted_at: ack.record.submitted_at,
  }))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
  pub rsvps: Vec<RsvpRecord>,
}

/// `GET /rsvps`
pub async fn list<S, C>(
  State(service): State<Arc<ResponseService<S, C>>>,
) -> Result<Json<ListResponse>, ApiError>
where
  S: RecordStore,
  C: Clock,
{
  let rsvps = service
    .list()
    .await
    .map_err(|e| ApiError::from_service(e, FETCH_FAILED))?;
  Ok(Json(ListResponse { rsvps }))
}

// ─── View ─────────────────────────────────────────────────────────────────────

/// Owned form of [`RsvpView`] for the wire.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
  pub items:    Vec<RsvpRecord>,
  pub summary:  Summary,
  pub shown:    usize,
  pub filtered: bool,
}

impl From<RsvpView<'_>> for ViewResponse {
  fn from(v: RsvpView<'_>) -> Self {
    ViewResponse {
      items:    v.items.into_iter().cloned().collect(),
      summary:  v.summary,
      shown:    v.shown,
      filtered: v.filtered,
    }
  }
}

/// `GET /rsvps/view[?search=...][&filter=...][&sort=...]`
pub async fn view<S, C>(
  State(service): State<Arc<ResponseService<S, C>>>,
  Query(params): Query<ViewParams>,
) -> Result<Json<ViewResponse>, ApiError>
where
  S: RecordStore,
  C: Clock,
{
  let view = service
    .with_view(&params, |v| ViewResponse::from(v))
    .await
    .map_err(|e| ApiError::from_service(e, FETCH_FAILED))?;
  Ok(Json(view))
}
