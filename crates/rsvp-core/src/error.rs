//! Error types for `rsvp-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// One or more required submission fields were absent or blank.
  #[error("Missing required fields: {}", .0.join(", "))]
  ValidationFailed(Vec<&'static str>),

  /// The record store could not complete a read or write.
  #[error("storage unavailable: {0}")]
  StorageUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error as [`Error::StorageUnavailable`].
  pub fn storage<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::StorageUnavailable(Box::new(err))
  }

  pub fn is_validation(&self) -> bool { matches!(self, Self::ValidationFailed(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
