//! Response detail pane — right panel.

use chrono::Local;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use rsvp_core::record::RsvpRecord;

/// Render `record` (the one under the list cursor) into `area`.
pub fn draw(f: &mut Frame, area: Rect, record: Option<&RsvpRecord>, focused: bool) {
  let border = if focused { Color::Gray } else { Color::DarkGray };
  let block = Block::default()
    .title(format!(" {} ", record.map_or("Detail", |r| r.name.as_str())))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let Some(r) = record else {
    f.render_widget(
      Paragraph::new("Nothing selected.")
        .style(Style::default().fg(Color::DarkGray))
        .block(block),
      area,
    );
    return;
  };

  let label = Style::default().fg(Color::DarkGray);
  let status = if r.is_attending() {
    Span::styled("Attending", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
  } else if r.is_declining() {
    Span::styled("Declining", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
  } else {
    Span::styled(format!("Unrecognised ({:?})", r.attending), Style::default().fg(Color::Yellow))
  };
  let guests = if r.guest_count() == 1 { "guest" } else { "guests" };

  let mut lines = vec![
    Line::from(vec![Span::styled("Status     ", label), status]),
    Line::from(vec![Span::styled("Email      ", label), Span::raw(r.email.clone())]),
    Line::from(vec![
      Span::styled("Party      ", label),
      Span::raw(format!("{} {guests}", r.guests)),
    ]),
    Line::from(vec![
      Span::styled("Submitted  ", label),
      Span::raw(
        r.submitted_at
          .with_timezone(&Local)
          .format("%Y-%m-%d %H:%M")
          .to_string(),
      ),
    ]),
  ];

  if !r.dietary.is_empty() {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Dietary restrictions", label)));
    lines.push(Line::from(r.dietary.clone()));
  }
  if !r.message.is_empty() {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Message", label)));
    lines.push(Line::from(Span::styled(
      format!("“{}”", r.message),
      Style::default().add_modifier(Modifier::ITALIC),
    )));
  }

  f.render_widget(
    Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
    area,
  );
}
