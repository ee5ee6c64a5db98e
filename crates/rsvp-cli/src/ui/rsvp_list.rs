//! Response list pane — left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use rsvp_core::view::RsvpView;

use crate::app::{App, Focus};

/// Render the filtered, sorted responses into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App, view: &RsvpView<'_>) {
  let border = if app.focus == Focus::List {
    Color::Gray
  } else {
    Color::DarkGray
  };
  let block = Block::default()
    .title(format!(" Responses ({}/{}) ", view.shown, view.summary.total))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  if view.items.is_empty() {
    let msg = if view.filtered {
      "No RSVPs match your filters"
    } else {
      "No RSVPs yet"
    };
    f.render_widget(
      Paragraph::new(msg)
        .style(Style::default().fg(Color::DarkGray))
        .block(block),
      area,
    );
    return;
  }

  let items: Vec<ListItem> = view
    .items
    .iter()
    .map(|r| {
      let (badge, color) = if r.is_attending() {
        ("✔ ", Color::Green)
      } else if r.is_declining() {
        ("✘ ", Color::Red)
      } else {
        ("? ", Color::Yellow)
      };
      ListItem::new(Line::from(vec![
        Span::styled(badge, Style::default().fg(color)),
        Span::raw(r.name.clone()),
        Span::styled(format!("  ({})", r.guests), Style::default().fg(Color::DarkGray)),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    area,
    &mut state,
  );
}
