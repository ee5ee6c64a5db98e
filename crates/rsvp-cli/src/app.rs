//! Dashboard state machine and key dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rsvp_core::{
  record::RsvpRecord,
  view::{RsvpView, ViewParams, compute_view},
};

use crate::client::ApiClient;

// ─── Focus ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  /// Keyboard drives the response list.
  List,
  /// Keyboard drives the detail pane.
  Detail,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level dashboard state.
pub struct App {
  pub focus: Focus,

  /// Snapshot of every RSVP from the last successful load.
  pub records: Vec<RsvpRecord>,

  /// Search, status filter and sort mode.
  pub params: ViewParams,

  /// Whether the user is typing a search query.
  pub search_active: bool,

  /// Cursor position within the *current view*.
  pub list_cursor: usize,

  /// Set when the last load failed; rendered instead of the list so that a
  /// failure is never mistaken for an empty guest list.
  pub load_error: Option<String>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      focus: Focus::List,
      records: Vec::new(),
      params: ViewParams::default(),
      search_active: false,
      list_cursor: 0,
      load_error: None,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch the full collection. Failures are kept in `load_error`.
  pub async fn load(&mut self) {
    self.status_msg = "Loading RSVPs…".into();
    match self.client.list_rsvps().await {
      Ok(records) => self.set_records(records),
      Err(e) => {
        self.load_error = Some(format!("{e:#}"));
        self.status_msg = String::new();
      }
    }
  }

  pub fn set_records(&mut self, records: Vec<RsvpRecord>) {
    self.records = records;
    self.load_error = None;
    self.list_cursor = 0;
    self.status_msg = format!("Loaded {} RSVPs", self.records.len());
  }

  // ── View ──────────────────────────────────────────────────────────────────

  /// Recompute the dashboard view from the snapshot and current controls.
  pub fn view(&self) -> RsvpView<'_> { compute_view(&self.records, &self.params) }

  /// The record under the list cursor, if any.
  pub fn cursor_record(&self) -> Option<&RsvpRecord> {
    self.view().items.get(self.list_cursor).copied()
  }

  fn reset_cursor(&mut self) {
    self.list_cursor = 0;
    if self.focus == Focus::Detail && self.cursor_record().is_none() {
      self.focus = Focus::List;
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.search_active {
      self.handle_search_key(key);
      return Ok(true);
    }

    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Char('r') => self.load().await,

      KeyCode::Char('/') => {
        self.search_active = true;
        self.params.search.clear();
        self.reset_cursor();
      }
      KeyCode::Char('f') => {
        self.params.filter = self.params.filter.cycle();
        self.reset_cursor();
      }
      KeyCode::Char('s') => {
        self.params.sort = self.params.sort.cycle();
        self.reset_cursor();
      }

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.view().items.len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if self.cursor_record().is_some() {
          self.focus = Focus::Detail;
        }
      }
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        if self.focus == Focus::Detail {
          self.focus = Focus::List;
        } else if !self.params.search.is_empty() {
          self.params.search.clear();
          self.reset_cursor();
        }
      }

      _ => {}
    }
    Ok(true)
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        self.params.search.clear();
      }
      KeyCode::Enter => self.search_active = false,
      KeyCode::Backspace => {
        self.params.search.pop();
      }
      KeyCode::Char(c) => self.params.search.push(c),
      _ => return,
    }
    self.reset_cursor();
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone, Utc};
  use rsvp_core::view::{SortMode, StatusFilter};

  use super::*;
  use crate::client::ApiConfig;

  fn rec(name: &str, attending: &str, minutes: i64) -> RsvpRecord {
    RsvpRecord {
      name:         name.into(),
      email:        format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
      guests:       "1".into(),
      attending:    attending.into(),
      dietary:      String::new(),
      message:      String::new(),
      submitted_at: Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes),
    }
  }

  fn app() -> App {
    let client = ApiClient::new(ApiConfig { base_url: "http://127.0.0.1:9".into() }).unwrap();
    let mut app = App::new(client);
    app.set_records(vec![
      rec("Ana Cruz", "yes", 0),
      rec("Ben Diaz", "no", 10),
      rec("Carla Moss", "yes", 20),
    ]);
    app
  }

  fn press(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  async fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
      app.handle_key(press(KeyCode::Char(c))).await.unwrap();
    }
  }

  #[tokio::test]
  async fn starts_latest_first_and_moves_cursor() {
    let mut app = app();
    assert_eq!(app.cursor_record().unwrap().name, "Carla Moss");

    app.handle_key(press(KeyCode::Down)).await.unwrap();
    assert_eq!(app.cursor_record().unwrap().name, "Ben Diaz");

    for _ in 0..5 {
      app.handle_key(press(KeyCode::Char('j'))).await.unwrap();
    }
    assert_eq!(app.list_cursor, 2);
  }

  #[tokio::test]
  async fn search_narrows_view_but_not_summary() {
    let mut app = app();
    app.handle_key(press(KeyCode::Char('/'))).await.unwrap();
    type_str(&mut app, "BEN").await;
    app.handle_key(press(KeyCode::Enter)).await.unwrap();

    assert!(!app.search_active);
    let view = app.view();
    assert_eq!(view.shown, 1);
    assert_eq!(view.summary.total, 3);
    assert_eq!(view.summary.attending, 2);

    app.handle_key(press(KeyCode::Esc)).await.unwrap();
    assert!(app.params.search.is_empty());
    assert_eq!(app.view().shown, 3);
  }

  #[tokio::test]
  async fn q_inside_search_is_text_not_quit() {
    let mut app = app();
    app.handle_key(press(KeyCode::Char('/'))).await.unwrap();
    assert!(app.handle_key(press(KeyCode::Char('q'))).await.unwrap());
    assert_eq!(app.params.search, "q");

    app.handle_key(press(KeyCode::Esc)).await.unwrap();
    assert!(!app.handle_key(press(KeyCode::Char('q'))).await.unwrap());
  }

  #[tokio::test]
  async fn filter_and_sort_keys_cycle() {
    let mut app = app();
    app.handle_key(press(KeyCode::Char('f'))).await.unwrap();
    assert_eq!(app.params.filter, StatusFilter::Attending);
    assert_eq!(app.view().shown, 2);

    app.handle_key(press(KeyCode::Char('s'))).await.unwrap();
    app.handle_key(press(KeyCode::Char('s'))).await.unwrap();
    assert_eq!(app.params.sort, SortMode::Name);
    assert_eq!(app.cursor_record().unwrap().name, "Ana Cruz");
  }

  #[tokio::test]
  async fn detail_closes_when_view_empties() {
    let mut app = app();
    app.handle_key(press(KeyCode::Enter)).await.unwrap();
    assert_eq!(app.focus, Focus::Detail);

    app.params.search = "nobody".into();
    app.reset_cursor();
    assert_eq!(app.focus, Focus::List);
    assert!(app.cursor_record().is_none());
  }
}
