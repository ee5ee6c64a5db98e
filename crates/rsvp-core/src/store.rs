//! The `RecordStore` trait.
//!
//! Implemented by storage backends (e.g. `rsvp-store-sqlite`). The response
//! service depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{key::RecordKey, record::RsvpRecord};

/// A narrow persistence façade for RSVP records.
///
/// Writes are append-only: there is no update or delete. Backends must provide
/// atomicity for a single key write and for a single prefix read, so several
/// service instances can write concurrently without external locking.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist `record` under `key`.
  ///
  /// Must fail rather than overwrite if a record already exists under `key`.
  /// Failures are returned to the caller, never retried here.
  fn write<'a>(
    &'a self,
    key: &'a RecordKey,
    record: &'a RsvpRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Return every record whose key starts with `prefix`, in no particular
  /// order.
  fn list_by_prefix<'a>(
    &'a self,
    prefix: &'a str,
  ) -> impl Future<Output = Result<Vec<RsvpRecord>, Self::Error>> + Send + 'a;
}

impl<S: RecordStore> RecordStore for std::sync::Arc<S> {
  type Error = S::Error;

  fn write<'a>(
    &'a self,
    key: &'a RecordKey,
    record: &'a RsvpRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a {
    (**self).write(key, record)
  }

  fn list_by_prefix<'a>(
    &'a self,
    prefix: &'a str,
  ) -> impl Future<Output = Result<Vec<RsvpRecord>, Self::Error>> + Send + 'a {
    (**self).list_by_prefix(prefix)
  }
}
