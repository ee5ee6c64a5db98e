//! TUI rendering — orchestrates all panes.

pub mod rsvp_detail;
pub mod rsvp_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use rsvp_core::view::{RsvpView, Summary};

use crate::app::{App, Focus};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(4), // stat cards
      Constraint::Length(1), // controls
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);

  if let Some(err) = &app.load_error {
    draw_error(f, rows[1].union(rows[3]), err);
  } else {
    let view = app.view();
    draw_stats(f, rows[1], &view.summary);
    draw_controls(f, rows[2], app, &view);
    draw_body(f, rows[3], app, &view);
  }

  draw_status(f, rows[4], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " RSVP Responses",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  let pad = area
    .width
    .saturating_sub(left.content.len() as u16)
    .saturating_sub(right.content.len() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Stat cards ───────────────────────────────────────────────────────────────

fn draw_stats(f: &mut Frame, area: Rect, summary: &Summary) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 3); 3])
    .split(area);

  let cards = [
    ("Attending", summary.attending.to_string(), Color::Green),
    ("Declining", summary.declining.to_string(), Color::Red),
    ("Total Guests", summary.total_guests.to_string(), Color::Cyan),
  ];

  for ((label, value, color), col) in cards.into_iter().zip(cols.iter()) {
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let text = vec![
      Line::from(Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      )),
      Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
    ];
    f.render_widget(
      Paragraph::new(text).alignment(Alignment::Center).block(block),
      *col,
    );
  }
}

// ─── Controls ─────────────────────────────────────────────────────────────────

fn draw_controls(f: &mut Frame, area: Rect, app: &App, view: &RsvpView<'_>) {
  let search = if app.search_active {
    format!("/{}_", app.params.search)
  } else if app.params.search.is_empty() {
    "—".to_string()
  } else {
    format!("/{}", app.params.search)
  };

  let dim = Style::default().fg(Color::DarkGray);
  let line = Line::from(vec![
    Span::raw(" Showing "),
    Span::styled(view.shown.to_string(), Style::default().add_modifier(Modifier::BOLD)),
    Span::raw(format!(" of {} responses", view.summary.total)),
    Span::styled("  │  filter: ", dim),
    Span::raw(app.params.filter.label()),
    Span::styled("  │  sort: ", dim),
    Span::raw(app.params.sort.label()),
    Span::styled("  │  search: ", dim),
    Span::styled(search, Style::default().fg(Color::Yellow)),
  ]);
  f.render_widget(Paragraph::new(line), area);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App, view: &RsvpView<'_>) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  rsvp_list::draw(f, cols[0], app, view);
  rsvp_detail::draw(f, cols[1], app.cursor_record(), app.focus == Focus::Detail);
}

fn draw_error(f: &mut Frame, area: Rect, err: &str) {
  let block = Block::default()
    .title(" Error Loading RSVPs ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  let text = vec![
    Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))),
    Line::from(""),
    Line::from(Span::styled(
      "Press r to retry.",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(
    Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
    area,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.focus {
    _ if app.search_active => ("SEARCH", "Type to search name or email  Enter apply  Esc clear"),
    Focus::List => (
      "LIST",
      "↑↓/jk move  / search  f filter  s sort  Enter detail  r reload  q quit",
    ),
    Focus::Detail => ("DETAIL", "Esc back  ↑↓/jk move  f filter  s sort  q quit"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    format!("{}  ·  {hints}", app.status_msg)
  };

  let line = Line::from(vec![
    Span::styled(
      format!(" {mode_label} "),
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray)),
  ]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
