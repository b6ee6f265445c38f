//! Conversation pane
//!
//! Header with the contact's presence, the message list and the composer.
//! Without an active contact the pane shows a placeholder instead.

use chirp_app::{App, ConversationView, Focus};
use chirp_core::{Contact, DeliveryStatus, Environment, Instant, Message};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthChar;

use super::composer;

const EMPTY_STATE: &str = "Select a contact to start chatting";
const TYPING: &str = "typing...";
const BORDER_SIZE: u16 = 2;
const HEADER_HEIGHT: u16 = 4;
const COMPOSER_HEIGHT: u16 = 3;

/// Render the conversation pane.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let (Some(contact), Some(view)) = (app.active_contact_record(), app.conversation()) else {
        render_empty(frame, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(BORDER_SIZE),
            Constraint::Length(COMPOSER_HEIGHT),
        ])
        .split(area);

    let [header_area, messages_area, composer_area] = chunks.as_ref() else {
        return;
    };

    let focused = app.focus() == Focus::Conversation;
    render_header(frame, contact, view.is_peer_typing(), *header_area);
    render_messages(frame, view, *messages_area);
    composer::render(frame, view.composer(), focused, *composer_area);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let top = inner.y.saturating_add(inner.height / 2);
    let line_area = Rect::new(inner.x, top, inner.width, inner.height.min(1));
    let paragraph = Paragraph::new(EMPTY_STATE)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, line_area);
}

fn render_header(frame: &mut Frame, contact: &Contact, typing: bool, area: Rect) {
    let subtitle = if typing {
        Span::styled(TYPING, Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC))
    } else {
        Span::styled(contact.presence_text().to_owned(), Style::default().fg(Color::Gray))
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", contact.initial()),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::raw(" "),
            Span::styled(contact.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![Span::raw("    "), subtitle]),
    ];

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_messages<I: Instant>(frame: &mut Frame, view: &ConversationView<I>, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = usize::from(inner.width);
    let mut lines = vec![date_separator(view.date_label(), width)];
    // ends[i]: line count once the separator and the first i messages are laid out
    let mut ends = vec![lines.len()];
    for message in view.messages() {
        lines.extend(message_lines(message, width));
        ends.push(lines.len());
    }
    if view.is_peer_typing() {
        lines.push(Line::styled(
            TYPING,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ));
    }

    let bottom = match view.scroll_back() {
        0 => lines.len(),
        back => ends.get(view.messages().len().saturating_sub(back)).copied().unwrap_or(0),
    };
    let height = usize::from(inner.height);
    let skip = bottom.saturating_sub(height);
    let visible: Vec<_> = lines.into_iter().skip(skip).take(height).collect();

    frame.render_widget(Paragraph::new(visible), inner);
}

fn date_separator(label: &str, width: usize) -> Line<'static> {
    let rule_width = width.saturating_sub(label.chars().count() + 2) / 2;
    let rule = "─".repeat(rule_width);
    Line::styled(format!("{rule} {label} {rule}"), Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
}

/// Lines for one message: wrapped text with the time (and status glyph for
/// outgoing messages) on the last line.
fn message_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
    let bubble_width = (width * 3 / 4).max(1);
    let text_style = if message.outgoing {
        Style::default().fg(Color::White).bg(Color::Blue)
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    };

    let mut lines: Vec<Line<'static>> = wrap(&message.text, bubble_width)
        .into_iter()
        .map(|chunk| Line::from(Span::styled(chunk, text_style)))
        .collect();

    let mut meta = vec![Span::styled(message.time.clone(), Style::default().fg(Color::Gray))];
    if message.outgoing {
        let glyph_style = if message.status == DeliveryStatus::Read {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        meta.push(Span::raw(" "));
        meta.push(Span::styled(message.status.glyph(), glyph_style));
    }
    lines.push(Line::from(meta));

    if message.outgoing {
        lines.into_iter().map(Line::right_aligned).collect()
    } else {
        lines
    }
}

/// Split `text` into chunks no wider than `width` terminal columns. A
/// character wider than `width` gets a chunk of its own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += w;
    }
    chunks.push(current);
    chunks
}
