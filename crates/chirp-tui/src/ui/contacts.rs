//! Contacts sidebar
//!
//! Search line, All/Online tabs, the filtered contact list and a count
//! footer.

use chirp_app::{App, Focus};
use chirp_core::{Contact, ContactFilter, Environment, timefmt};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{ClickMap, composer};

const SEARCH_PLACEHOLDER: &str = "Search contacts...";
const EMPTY_LIST: &str = "No contacts found";
const ONLINE_DOT: &str = "●";
const ENTRY_HEIGHT: u16 = 2;

/// Render the contacts sidebar and record where each entry landed.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) -> ClickMap {
    let focused = app.focus() == Focus::Directory;
    let border_style =
        if focused { Style::default().fg(Color::Cyan) } else { Style::default() };
    let block =
        Block::default().borders(Borders::ALL).border_style(border_style).title(" Contacts ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let [search_area, tabs_area, list_area, footer_area] = chunks.as_ref() else {
        return ClickMap::default();
    };

    let view = app.directory_view();
    composer::render_line(frame, view.query(), SEARCH_PLACEHOLDER, focused, *search_area);
    render_tabs(frame, view.filter(), *tabs_area);

    let visible = app.visible_contacts();
    let clicks = render_list(frame, app, &visible, focused, *list_area);

    let count = app.directory().len();
    let noun = if count == 1 { "contact" } else { "contacts" };
    frame.render_widget(
        Paragraph::new(format!("{count} {noun}")).style(Style::default().fg(Color::DarkGray)),
        *footer_area,
    );

    clicks
}

fn render_tabs(frame: &mut Frame, filter: ContactFilter, area: Rect) {
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                format!("[{label}]"),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray))
        }
    };

    let line = Line::from(vec![
        tab("All", filter == ContactFilter::All),
        Span::raw(" "),
        tab("Online", filter == ContactFilter::Online),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_list<E: Environment>(
    frame: &mut Frame,
    app: &App<E>,
    visible: &[&Contact],
    focused: bool,
    area: Rect,
) -> ClickMap {
    let mut clicks = ClickMap::default();

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new(EMPTY_LIST).style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return clicks;
    }

    let slots = usize::from((area.height / ENTRY_HEIGHT).max(1));
    let highlight = app.directory_view().highlight().min(visible.len() - 1);
    let first = (highlight + 1).saturating_sub(slots);

    let mut y = area.y;
    for (index, contact) in visible.iter().enumerate().skip(first).take(slots) {
        if y.saturating_add(ENTRY_HEIGHT) > area.y.saturating_add(area.height) {
            break;
        }
        let entry_area = Rect::new(area.x, y, area.width, ENTRY_HEIGHT);
        let active = app.active_contact() == Some(contact.id);
        let highlighted = focused && index == highlight;

        render_entry(frame, contact, active, highlighted, entry_area);
        clicks.push(entry_area, contact.id);
        y = y.saturating_add(ENTRY_HEIGHT);
    }

    clicks
}

fn render_entry(frame: &mut Frame, contact: &Contact, active: bool, highlighted: bool, area: Rect) {
    let base = if active {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else if highlighted {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };

    let avatar_style = Style::default().fg(Color::Black).bg(Color::Cyan);
    let name_style = base.add_modifier(Modifier::BOLD);
    let time = timefmt::list_time_label(contact.last_message_time.as_deref());

    let name_width = usize::from(area.width).saturating_sub(4 + time.chars().count() + 1);
    let name: String = contact.name.chars().take(name_width).collect();
    let pad = name_width.saturating_sub(name.chars().count());

    let first = Line::from(vec![
        Span::styled(format!(" {} ", contact.initial()), avatar_style),
        Span::styled(" ", base),
        Span::styled(name, name_style),
        Span::styled(" ".repeat(pad), base),
        Span::styled(time, base.fg(Color::Gray)),
    ]);

    let presence = if contact.is_online {
        Span::styled(ONLINE_DOT, Style::default().fg(Color::Green))
    } else {
        Span::raw(" ")
    };
    let preview_width = usize::from(area.width).saturating_sub(4);
    let preview: String = contact.last_message.chars().take(preview_width).collect();
    let second = Line::from(vec![
        Span::raw(" "),
        presence,
        Span::raw("  "),
        Span::styled(preview, base.fg(Color::Gray)),
    ]);

    frame.render_widget(Paragraph::new(vec![first, second]).style(base), area);
}
