//! Single-line text inputs
//!
//! Shared by the contact search line and the message composer. Shows a dim
//! placeholder while empty and places the terminal cursor when focused.

use chirp_app::TextInput;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

const PROMPT: &str = "> ";
const PROMPT_WIDTH: u16 = 2;
const RIGHT_PADDING: u16 = 1;

/// Render an input on a single line without a border.
#[allow(clippy::cast_possible_truncation)]
pub fn render_line(
    frame: &mut Frame,
    input: &TextInput,
    placeholder: &str,
    focused: bool,
    area: Rect,
) {
    let paragraph = if input.is_empty() {
        Paragraph::new(format!("{PROMPT}{placeholder}")).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(format!("{PROMPT}{}", input.text())).style(Style::default().fg(Color::White))
    };
    frame.render_widget(paragraph, area);

    if !focused || area.width == 0 || area.height == 0 {
        return;
    }

    let available_width = area.width.saturating_sub(PROMPT_WIDTH + RIGHT_PADDING);
    let cursor_offset = (input.cursor() as u16).min(available_width);
    let cursor_x = area.x.saturating_add(PROMPT_WIDTH).saturating_add(cursor_offset);
    frame.set_cursor_position((cursor_x, area.y));
}

/// Render the message composer inside a bordered box.
pub fn render(frame: &mut Frame, input: &TextInput, focused: bool, area: Rect) {
    let border_style =
        if focused { Style::default().fg(Color::Cyan) } else { Style::default() };
    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    render_line(frame, input, "Type a message...", focused, inner);
}
