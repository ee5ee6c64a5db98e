//! The response service: validates submissions, persists them, and serves the
//! record collection back to read clients.
//!
//! Each call is independent. Concurrent submissions are not sequenced against
//! each other; the only ordering a record carries is its own `submitted_at`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
  Error, Result,
  key::{PREFIX, RecordKey},
  record::{RsvpRecord, Submission},
  store::RecordStore,
  view::{RsvpView, ViewParams, compute_view},
};

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Source of acceptance timestamps.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// The system UTC clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> { Utc::now() }
}

// ─── Acknowledgement ─────────────────────────────────────────────────────────

/// Returned by [`ResponseService::submit`] once the record is durably written.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
  /// Rendered storage key of the new record.
  pub key:    String,
  pub record: RsvpRecord,
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Request-handling layer over a [`RecordStore`].
pub struct ResponseService<S, C = SystemClock> {
  store: S,
  clock: C,
}

impl<S: RecordStore> ResponseService<S> {
  pub fn new(store: S) -> Self { Self { store, clock: SystemClock } }
}

impl<S, C> ResponseService<S, C>
where
  S: RecordStore,
  C: Clock,
{
  /// Build a service with a caller-supplied clock.
  pub fn with_clock(store: S, clock: C) -> Self { Self { store, clock } }

  /// Validate `submission`, stamp it, and write it as one new record.
  ///
  /// Either the record is written or nothing is: validation failures never
  /// reach the store, and store failures are returned unretried.
  #[tracing::instrument(skip_all, fields(email = submission.email.as_deref().unwrap_or_default()))]
  pub async fn submit(&self, submission: Submission) -> Result<Acknowledgement> {
    let submitted_at = self.clock.now();
    let record = submission.into_record(submitted_at).inspect_err(|e| {
      tracing::debug!("rejected submission: {e}");
    })?;
    let key = RecordKey::derive(&record.email, submitted_at);

    self.store.write(&key, &record).await.map_err(|e| {
      tracing::error!("failed to write RSVP {key}: {e}");
      Error::storage(e)
    })?;

    tracing::info!("RSVP submitted successfully for {}", record.email);
    Ok(Acknowledgement { key: key.to_string(), record })
  }

  /// Return every stored record, unfiltered and in no particular order.
  #[tracing::instrument(skip_all)]
  pub async fn list(&self) -> Result<Vec<RsvpRecord>> {
    self.store.list_by_prefix(PREFIX).await.map_err(|e| {
      tracing::error!("failed to list RSVPs: {e}");
      Error::storage(e)
    })
  }

  /// Fetch one snapshot of the collection and hand it to `f` together with
  /// the dashboard view computed under `params`.
  pub async fn with_view<T>(
    &self,
    params: &ViewParams,
    f: impl FnOnce(RsvpView<'_>) -> T,
  ) -> Result<T> {
    let records = self.list().await?;
    Ok(f(compute_view(&records, params)))
  }
}
