//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use rsvp_core::{
  key::RecordKey,
  record::RsvpRecord,
  service::ResponseService,
  store::RecordStore,
};
use rsvp_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(ResponseService::new(store)))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
  };
  (status, json)
}

fn ana() -> Value {
  json!({ "name": "Ana Cruz", "email": "ana@x.com", "guests": "2", "attending": "yes" })
}

// ── Failing backend ──────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("disk on fire")]
struct Broken;

struct BrokenStore;

impl RecordStore for BrokenStore {
  type Error = Broken;

  async fn write(&self, _key: &RecordKey, _record: &RsvpRecord) -> Result<(), Broken> { Err(Broken) }

  async fn list_by_prefix(&self, _prefix: &str) -> Result<Vec<RsvpRecord>, Broken> { Err(Broken) }
}

fn broken_app() -> Router { api_router(Arc::new(ResponseService::new(BrokenStore))) }

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ok() {
  let (status, body) = send(app().await, "GET", "/health", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "status": "ok" }));
}

// ── Submit / list ────────────────────────────────────────────────────────────

#[tokio::test]
async fn submit_then_list_returns_the_record() {
  let app = app().await;

  let (status, body) = send(app.clone(), "POST", "/rsvp", Some(ana())).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  assert_eq!(body["message"], "RSVP submitted successfully");

  let (status, body) = send(app, "GET", "/rsvps", None).await;
  assert_eq!(status, StatusCode::OK);
  let rsvps = body["rsvps"].as_array().unwrap();
  assert_eq!(rsvps.len(), 1);
  assert_eq!(rsvps[0]["name"], "Ana Cruz");
  assert_eq!(rsvps[0]["guests"], "2");
  assert_eq!(rsvps[0]["attending"], "yes");
  assert_eq!(rsvps[0]["dietary"], "");
  assert!(rsvps[0]["submittedAt"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn missing_fields_return_400_and_write_nothing() {
  let app = app().await;

  let (status, body) = send(
    app.clone(),
    "POST",
    "/rsvp",
    Some(json!({ "name": "Ben Diaz", "email": "", "guests": "1" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Missing required fields: email, attending");

  let (_, body) = send(app, "GET", "/rsvps", None).await;
  assert_eq!(body["rsvps"], json!([]));
}

#[tokio::test]
async fn empty_collection_is_success_not_error() {
  let (status, body) = send(app().await, "GET", "/rsvps", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "rsvps": [] }));
}

#[tokio::test]
async fn storage_failures_return_500_with_generic_message() {
  let (status, body) = send(broken_app(), "POST", "/rsvp", Some(ana())).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body, json!({ "error": "Failed to save RSVP" }));

  let (status, body) = send(broken_app(), "GET", "/rsvps", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body, json!({ "error": "Failed to fetch RSVPs" }));

  let (status, _) = send(broken_app(), "GET", "/rsvps/view", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn validation_wins_over_storage_failure() {
  let (status, _) = send(broken_app(), "POST", "/rsvp", Some(json!({ "name": "Ana" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── View ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn view_filters_sorts_and_summarises() {
  let app = app().await;
  for body in [
    json!({ "name": "Ben Diaz", "email": "ben@y.org", "guests": "1", "attending": "no" }),
    json!({ "name": "Ana Cruz", "email": "ana@x.com", "guests": "3", "attending": "yes" }),
    json!({ "name": "Carla Moss", "email": "carla@x.com", "guests": "2", "attending": "yes" }),
  ] {
    let (status, _) = send(app.clone(), "POST", "/rsvp", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
  }

  let (status, body) = send(app.clone(), "GET", "/rsvps/view?filter=attending&sort=name", None).await;
  assert_eq!(status, StatusCode::OK);
  let names: Vec<_> = body["items"]
    .as_array()
    .unwrap()
    .iter()
    .map(|i| i["name"].as_str().unwrap().to_owned())
    .collect();
  assert_eq!(names, ["Ana Cruz", "Carla Moss"]);
  assert_eq!(body["shown"], 2);
  assert_eq!(body["filtered"], true);
  assert_eq!(
    body["summary"],
    json!({ "attending": 2, "declining": 1, "totalGuests": 5, "total": 3 })
  );

  let (_, body) = send(app, "GET", "/rsvps/view?search=ANA", None).await;
  assert_eq!(body["shown"], 1);
  assert_eq!(body["items"][0]["email"], "ana@x.com");
  assert_eq!(body["summary"]["total"], 3);
}

#[tokio::test]
async fn view_rejects_unknown_filter() {
  let (status, _) = send(app().await, "GET", "/rsvps/view?filter=maybe", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}
