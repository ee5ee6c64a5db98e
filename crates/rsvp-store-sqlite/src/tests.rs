//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rsvp_core::{
  key::{PREFIX, RecordKey},
  record::RsvpRecord,
  service::ResponseService,
  store::RecordStore,
};

use crate::{Error, SqliteStore, schema::SCHEMA_VERSION};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn at(minutes: i64) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2026, 6, 20, 14, 0, 0).unwrap() + Duration::minutes(minutes)
}

fn record(name: &str, email: &str, attending: &str, minutes: i64) -> RsvpRecord {
  RsvpRecord {
    name:         name.into(),
    email:        email.into(),
    guests:       "2".into(),
    attending:    attending.into(),
    dietary:      "vegetarian".into(),
    message:      "Can't wait!".into(),
    submitted_at: at(minutes),
  }
}

// ─── Writes ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn write_then_list_round_trips_every_field() {
  let s = store().await;
  let r = record("Ana Cruz", "ana@x.com", "yes", 0);
  let key = RecordKey::from_parts(&r.email, 1);

  s.write(&key, &r).await.unwrap();

  let listed = s.list_by_prefix(PREFIX).await.unwrap();
  assert_eq!(listed, vec![r]);
}

#[tokio::test]
async fn write_never_overwrites_an_existing_key() {
  let s = store().await;
  let key = RecordKey::from_parts("ana@x.com", 42);

  s.write(&key, &record("Ana Cruz", "ana@x.com", "yes", 0)).await.unwrap();
  let err = s
    .write(&key, &record("Ana Cruz", "ana@x.com", "no", 5))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::KeyExists(ref k) if k == "rsvp:ana@x.com:42"), "{err}");

  let listed = s.list_by_prefix(PREFIX).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].attending, "yes");
}

#[tokio::test]
async fn same_email_different_tokens_are_independent() {
  let s = store().await;
  s.write(&RecordKey::from_parts("ana@x.com", 1), &record("Ana Cruz", "ana@x.com", "yes", 0))
    .await
    .unwrap();
  s.write(&RecordKey::from_parts("ana@x.com", 2), &record("Ana Cruz", "ana@x.com", "no", 1))
    .await
    .unwrap();

  assert_eq!(s.list_by_prefix(PREFIX).await.unwrap().len(), 2);
}

// ─── Prefix scans ────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_lists_nothing() {
  let s = store().await;
  assert!(s.list_by_prefix(PREFIX).await.unwrap().is_empty());
}

#[tokio::test]
async fn narrower_prefix_selects_one_email() {
  let s = store().await;
  s.write(&RecordKey::from_parts("ana@x.com", 1), &record("Ana Cruz", "ana@x.com", "yes", 0))
    .await
    .unwrap();
  s.write(&RecordKey::from_parts("ben@y.org", 2), &record("Ben Diaz", "ben@y.org", "no", 1))
    .await
    .unwrap();

  let ana = s.list_by_prefix("rsvp:ana@x.com:").await.unwrap();
  assert_eq!(ana.len(), 1);
  assert_eq!(ana[0].name, "Ana Cruz");

  // Prefix matching is exact, not SQL LIKE.
  assert!(s.list_by_prefix("rsvp:ANA@").await.unwrap().is_empty());
  assert!(s.list_by_prefix("rsvp:_na").await.unwrap().is_empty());
}

#[tokio::test]
async fn prefix_without_namespace_separator_still_matches() {
  let s = store().await;
  s.write(&RecordKey::from_parts("ana@x.com", 1), &record("Ana Cruz", "ana@x.com", "yes", 0))
    .await
    .unwrap();

  assert_eq!(s.list_by_prefix("rs").await.unwrap().len(), 1);
  assert!(s.list_by_prefix("guestbook:").await.unwrap().is_empty());
}

// ─── With the response service ───────────────────────────────────────────────

#[tokio::test]
async fn service_round_trip_through_sqlite() {
  let svc = ResponseService::new(store().await);
  let submission = rsvp_core::record::Submission {
    name:      Some("Ana Cruz".into()),
    email:     Some("ana@x.com".into()),
    guests:    Some("2".into()),
    attending: Some("yes".into()),
    ..Default::default()
  };

  let ack = svc.submit(submission.clone()).await.unwrap();
  svc.submit(submission).await.unwrap();

  let listed = svc.list().await.unwrap();
  assert_eq!(listed.len(), 2);
  assert!(listed.contains(&ack.record));
}

#[tokio::test]
async fn records_persist_across_reopen() {
  let dir = std::env::temp_dir().join(format!("rsvp-store-test-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("reopen.db");
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.write(&RecordKey::from_parts("ana@x.com", 7), &record("Ana Cruz", "ana@x.com", "yes", 0))
      .await
      .unwrap();
  }

  let reopened = SqliteStore::open(&path).await.unwrap();
  let listed = reopened.list_by_prefix(PREFIX).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].email, "ana@x.com");

  drop(reopened);
  let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn fresh_store_is_stamped_with_schema_version() {
  let s = store().await;
  assert_eq!(s.schema_version().await.unwrap(), SCHEMA_VERSION);
}

#[tokio::test]
async fn reopening_a_current_database_skips_the_schema_batch() {
  let dir = std::env::temp_dir().join(format!("rsvp-schema-test-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("schema.db");
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.write(&RecordKey::from_parts("ben@y.org", 3), &record("Ben Diaz", "ben@y.org", "no", 0))
      .await
      .unwrap();
  }

  let reopened = SqliteStore::open(&path).await.unwrap();
  assert_eq!(reopened.schema_version().await.unwrap(), SCHEMA_VERSION);
  assert_eq!(reopened.list_by_prefix(PREFIX).await.unwrap().len(), 1);

  drop(reopened);
  let _ = std::fs::remove_dir_all(&dir);
}
