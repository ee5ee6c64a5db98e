//! RSVP records — the unit of persisted data.
//!
//! A record is created exactly once, when the response service accepts a
//! submission, and is never updated or deleted afterwards. Repeat submissions
//! from the same email produce independent records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// `attending` value for a guest who accepts.
pub const ATTENDING_YES: &str = "yes";
/// `attending` value for a guest who declines.
pub const ATTENDING_NO: &str = "no";
/// Party size recorded when the submission leaves `guests` blank.
pub const DEFAULT_GUESTS: &str = "1";

// ─── Stored record ───────────────────────────────────────────────────────────

/// One guest's attendance response, as persisted and as listed.
///
/// All fields except `submitted_at` are carried as text exactly as the guest
/// submitted them. `attending` is expected to be `"yes"` or `"no"`; other
/// values are stored faithfully and simply match neither status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRecord {
  pub name:         String,
  pub email:        String,
  pub guests:       String,
  pub attending:    String,
  #[serde(default)]
  pub dietary:      String,
  #[serde(default)]
  pub message:      String,
  /// Server-assigned at acceptance; never supplied by the client.
  pub submitted_at: DateTime<Utc>,
}

impl RsvpRecord {
  pub fn is_attending(&self) -> bool { self.attending == ATTENDING_YES }

  pub fn is_declining(&self) -> bool { self.attending == ATTENDING_NO }

  /// The party size as a number, read from the leading digits of `guests`
  /// (`"2 adults"` counts 2). `0` when there are none.
  pub fn guest_count(&self) -> u32 {
    let text = self.guests.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
    text[..end].parse().unwrap_or(0)
  }
}

// ─── Incoming submission ─────────────────────────────────────────────────────

/// A candidate record as received from a submitting client.
///
/// Every field is optional at this stage; [`Submission::into_record`] decides
/// whether the payload is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
  pub name:      Option<String>,
  pub email:     Option<String>,
  pub guests:    Option<String>,
  pub attending: Option<String>,
  pub dietary:   Option<String>,
  pub message:   Option<String>,
}

fn is_blank(field: &Option<String>) -> bool { field.as_deref().is_none_or(str::is_empty) }

impl Submission {
  /// Names of required fields that are absent or empty, in field order.
  pub fn missing_fields(&self) -> Vec<&'static str> {
    [
      ("name", &self.name),
      ("email", &self.email),
      ("attending", &self.attending),
    ]
    .into_iter()
    .filter(|(_, v)| is_blank(v))
    .map(|(k, _)| k)
    .collect()
  }

  /// Validate the submission and build the record to persist, stamped with
  /// `submitted_at`.
  pub fn into_record(self, submitted_at: DateTime<Utc>) -> Result<RsvpRecord> {
    let missing = self.missing_fields();
    if !missing.is_empty() {
      return Err(Error::ValidationFailed(missing));
    }

    let guests = self
      .guests
      .filter(|g| !g.is_empty())
      .unwrap_or_else(|| DEFAULT_GUESTS.to_owned());

    Ok(RsvpRecord {
      name: self.name.unwrap_or_default(),
      email: self.email.unwrap_or_default(),
      guests,
      attending: self.attending.unwrap_or_default(),
      dietary: self.dietary.unwrap_or_default(),
      message: self.message.unwrap_or_default(),
      submitted_at,
    })
  }
}
