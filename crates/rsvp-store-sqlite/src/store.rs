//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use rsvp_core::{key::RecordKey, record::RsvpRecord, store::RecordStore};

use crate::{
  Error, Result,
  encode::{RawRecord, encode_dt, namespace_of},
  schema::{SCHEMA, SCHEMA_VERSION},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An RSVP record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let version = self.schema_version().await?;
    if version >= SCHEMA_VERSION {
      tracing::debug!("schema at version {version}, nothing to apply");
      return Ok(());
    }
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// The `user_version` recorded in the database file.
  pub(crate) async fn schema_version(&self) -> Result<i64> {
    let version = self
      .conn
      .call(|conn| Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?))
      .await?;
    Ok(version)
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn write(&self, key: &RecordKey, record: &RsvpRecord) -> Result<()> {
    let key_str          = key.to_string();
    let namespace        = key.namespace().to_owned();
    let name             = record.name.clone();
    let email            = record.email.clone();
    let guests           = record.guests.clone();
    let attending        = record.attending.clone();
    let dietary          = record.dietary.clone();
    let message          = record.message.clone();
    let submitted_at_str = encode_dt(record.submitted_at);

    let key_for_insert = key_str.clone();
    let inserted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT OR IGNORE INTO rsvps (
             record_key, namespace, name, email, guests,
             attending, dietary, message, submitted_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            key_for_insert,
            namespace,
            name,
            email,
            guests,
            attending,
            dietary,
            message,
            submitted_at_str,
          ],
        )?)
      })
      .await?;

    if inserted == 0 {
      return Err(Error::KeyExists(key_str));
    }

    tracing::debug!("stored record {key_str}");
    Ok(())
  }

  async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<RsvpRecord>> {
    let namespace  = namespace_of(prefix).map(str::to_owned);
    let prefix_str = prefix.to_owned();

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT name, email, guests, attending, dietary, message, submitted_at
           FROM rsvps
           WHERE (?1 IS NULL OR namespace = ?1)
             AND substr(record_key, 1, length(?2)) = ?2",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![namespace, prefix_str], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }
}
