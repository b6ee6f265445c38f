//! Status bar
//!
//! Displays the focused pane, key hints and the transient status message.

use chirp_app::{App, Focus};
use chirp_core::Environment;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let (focus, hints) = match app.focus() {
        Focus::Directory => {
            ("Contacts", " | ↑↓ move | Enter open | Ctrl+O online | Tab chat | Esc quit")
        },
        Focus::Conversation => {
            ("Chat", " | Enter send | ↑↓ PgUp PgDn scroll | Ctrl+W close | Tab contacts | Esc quit")
        },
    };

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(focus, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled(hints, Style::default().fg(Color::Gray)),
    ];
    if let Some(message) = app.status_message() {
        spans.push(Span::styled(format!(" | {message}"), Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
