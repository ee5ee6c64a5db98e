//! Storage keys for RSVP records.
//!
//! A key has the shape `<namespace>:<email>:<token>`. The namespace is the
//! fixed literal [`NAMESPACE`], so a prefix scan over [`PREFIX`] yields exactly
//! the RSVP record set. The token is a write-time clock reading in
//! microseconds; [`next_token`] keeps tokens strictly increasing within the
//! process so two writes for the same email never share a key.

use std::{
  fmt,
  sync::atomic::{AtomicI64, Ordering},
};

use chrono::{DateTime, Utc};

/// Namespace literal shared by every RSVP record key.
pub const NAMESPACE: &str = "rsvp";

/// Prefix that selects every RSVP record key.
pub const PREFIX: &str = "rsvp:";

static LAST_TOKEN: AtomicI64 = AtomicI64::new(i64::MIN);

/// Return a uniqueness token for a write observed at `at`.
///
/// The token is `at` in microseconds since the Unix epoch, bumped past the
/// previously issued token when the clock has not advanced.
pub fn next_token(at: DateTime<Utc>) -> i64 {
  let now = at.timestamp_micros();
  let mut last = LAST_TOKEN.load(Ordering::Relaxed);
  loop {
    let next = if now > last { now } else { last + 1 };
    match LAST_TOKEN.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed) {
      Ok(_) => return next,
      Err(actual) => last = actual,
    }
  }
}

/// The key under which one record is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
  email: String,
  token: i64,
}

impl RecordKey {
  /// Derive a fresh key for a record from `email` written at `at`.
  pub fn derive(email: &str, at: DateTime<Utc>) -> Self {
    Self { email: email.to_owned(), token: next_token(at) }
  }

  /// Build a key from its parts without consulting the token clock.
  pub fn from_parts(email: impl Into<String>, token: i64) -> Self {
    Self { email: email.into(), token }
  }

  pub fn namespace(&self) -> &'static str { NAMESPACE }

  pub fn token(&self) -> i64 { self.token }
}

impl fmt::Display for RecordKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{NAMESPACE}:{}:{}", self.email, self.token)
  }
}
