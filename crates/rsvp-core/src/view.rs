//! The view aggregator behind the admin dashboard.
//!
//! [`compute_view`] is a pure function of the full record collection and a
//! set of [`ViewParams`]. It holds no state, so callers simply recompute the
//! whole view whenever the records or the parameters change; the collection is
//! a single wedding's guest list, so that stays cheap.

use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::record::RsvpRecord;

// ─── Parameters ──────────────────────────────────────────────────────────────

/// Which attendance status to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
  #[default]
  All,
  /// Only records with `attending == "yes"`.
  Attending,
  /// Only records with `attending == "no"`.
  Declining,
}

impl StatusFilter {
  pub fn matches(self, record: &RsvpRecord) -> bool {
    match self {
      Self::All => true,
      Self::Attending => record.is_attending(),
      Self::Declining => record.is_declining(),
    }
  }

  /// The next filter in display order, wrapping around.
  pub fn cycle(self) -> Self {
    match self {
      Self::All => Self::Attending,
      Self::Attending => Self::Declining,
      Self::Declining => Self::All,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::All => "All RSVPs",
      Self::Attending => "Attending",
      Self::Declining => "Declining",
    }
  }
}

/// How to order the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
  /// Most recent `submittedAt` first.
  #[default]
  Latest,
  /// Oldest `submittedAt` first.
  Oldest,
  /// Guest name, A to Z.
  Name,
}

impl SortMode {
  pub fn cycle(self) -> Self {
    match self {
      Self::Latest => Self::Oldest,
      Self::Oldest => Self::Name,
      Self::Name => Self::Latest,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Latest => "Latest First",
      Self::Oldest => "Oldest First",
      Self::Name => "Name (A-Z)",
    }
  }
}

/// Dashboard controls. Deserialises from a query string such as
/// `?search=ana&filter=attending&sort=name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParams {
  /// Case-insensitive substring matched against name or email.
  #[serde(default)]
  pub search: String,
  #[serde(default)]
  pub filter: StatusFilter,
  #[serde(default)]
  pub sort:   SortMode,
}

impl ViewParams {
  /// True when any control narrows the collection.
  pub fn is_narrowing(&self) -> bool {
    !self.search.trim().is_empty() || self.filter != StatusFilter::All
  }
}

// ─── Output ──────────────────────────────────────────────────────────────────

/// Counters over the full, unfiltered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
  /// Records with `attending == "yes"`.
  pub attending:    usize,
  /// Records with `attending == "no"`.
  pub declining:    usize,
  /// Sum of party sizes over attending records.
  pub total_guests: u64,
  /// Size of the unfiltered collection.
  pub total:        usize,
}

impl Summary {
  pub fn of(records: &[RsvpRecord]) -> Self {
    records.iter().fold(
      Summary { total: records.len(), ..Default::default() },
      |mut acc, r| {
        if r.is_attending() {
          acc.attending += 1;
          acc.total_guests += u64::from(r.guest_count());
        } else if r.is_declining() {
          acc.declining += 1;
        }
        acc
      },
    )
  }
}

/// A filtered, sorted projection of the collection plus its summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpView<'a> {
  pub items:    Vec<&'a RsvpRecord>,
  pub summary:  Summary,
  /// Number of items in the view.
  pub shown:    usize,
  /// Whether search or status filter narrowed the collection; lets the
  /// dashboard tell "no RSVPs yet" apart from "no RSVPs match".
  pub filtered: bool,
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

/// Build the dashboard view of `records` under `params`.
///
/// Applies the status filter, then the search, then the sort. Ties keep their
/// input order. The [`Summary`] always describes the full collection.
pub fn compute_view<'a>(records: &'a [RsvpRecord], params: &ViewParams) -> RsvpView<'a> {
  let query = params.search.trim().to_lowercase();

  let mut items: Vec<&RsvpRecord> = records
    .iter()
    .filter(|r| params.filter.matches(r))
    .filter(|r| matches_search(r, &query))
    .collect();

  match params.sort {
    SortMode::Latest => items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at)),
    SortMode::Oldest => items.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at)),
    SortMode::Name => items.sort_by_cached_key(|r| name_collation_key(&r.name)),
  }

  RsvpView {
    shown: items.len(),
    items,
    summary: Summary::of(records),
    filtered: params.is_narrowing(),
  }
}

/// Alphabetical key for a guest name: diacritics and case are ignored first,
/// then case, then the raw text breaks any remaining tie.
fn name_collation_key(name: &str) -> (String, String, String) {
  let folded: String = name.nfd().filter(|c| !is_combining_mark(*c)).collect();
  (folded.to_lowercase(), name.to_lowercase(), name.to_owned())
}

/// `query` must already be lowercased; an empty query matches everything.
fn matches_search(record: &RsvpRecord, query: &str) -> bool {
  query.is_empty()
    || record.name.to_lowercase().contains(query)
    || record.email.to_lowercase().contains(query)
}
