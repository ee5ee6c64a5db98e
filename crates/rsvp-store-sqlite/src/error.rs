//! Error type for `rsvp-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A record is already stored under this key; writes never overwrite.
  #[error("record key already exists: {0}")]
  KeyExists(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
