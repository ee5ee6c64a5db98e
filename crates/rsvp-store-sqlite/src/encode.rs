//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with fixed microsecond precision
//! so that lexical order matches chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use rsvp_core::record::RsvpRecord;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Prefix scans ────────────────────────────────────────────────────────────

/// The namespace discriminator a prefix scan can be confined to: everything
/// before the first `:`. `None` when the prefix does not name a whole
/// namespace.
pub fn namespace_of(prefix: &str) -> Option<&str> {
  prefix.split_once(':').map(|(ns, _)| ns)
}

// ─── Raw row ─────────────────────────────────────────────────────────────────

/// One `rsvps` row exactly as read from SQLite.
pub struct RawRecord {
  pub name:         String,
  pub email:        String,
  pub guests:       String,
  pub attending:    String,
  pub dietary:      String,
  pub message:      String,
  pub submitted_at: String,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      name:         row.get(0)?,
      email:        row.get(1)?,
      guests:       row.get(2)?,
      attending:    row.get(3)?,
      dietary:      row.get(4)?,
      message:      row.get(5)?,
      submitted_at: row.get(6)?,
    })
  }

  pub fn into_record(self) -> Result<RsvpRecord> {
    Ok(RsvpRecord {
      submitted_at: decode_dt(&self.submitted_at)?,
      name:         self.name,
      email:        self.email,
      guests:       self.guests,
      attending:    self.attending,
      dietary:      self.dietary,
      message:      self.message,
    })
  }
}
