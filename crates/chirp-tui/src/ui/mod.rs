//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O); the only output besides
//! the frame is a [`ClickMap`] telling the driver which screen rows belong
//! to which directory entry.

mod chat;
mod composer;
mod contacts;
mod status;

use chirp_app::App;
use chirp_core::{ContactId, Environment};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Screen regions of the rendered directory entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickMap {
    entries: Vec<(Rect, ContactId)>,
}

impl ClickMap {
    fn push(&mut self, area: Rect, contact_id: ContactId) {
        self.entries.push((area, contact_id));
    }

    /// Contact whose entry covers the cell. `None` outside the list.
    pub fn contact_at(&self, column: u16, row: u16) -> Option<ContactId> {
        self.entries
            .iter()
            .find(|(r, _)| {
                column >= r.x && column < r.x.saturating_add(r.width) && row >= r.y
                    && row < r.y.saturating_add(r.height)
            })
            .map(|(_, id)| *id)
    }
}

/// Render the entire UI.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>) -> ClickMap {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(MAIN_AREA_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    let [main_area, status_area] = chunks.as_ref() else {
        return ClickMap::default();
    };

    let clicks = render_main_area(frame, app, *main_area);
    status::render(frame, app, *status_area);
    clicks
}

/// Render the main area (contacts third + conversation two thirds).
fn render_main_area<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) -> ClickMap {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .split(area);

    let [contacts_area, chat_area] = chunks.as_ref() else {
        return ClickMap::default();
    };

    let clicks = contacts::render(frame, app, *contacts_area);
    chat::render(frame, app, *chat_area);
    clicks
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicU64, Ordering},
        },
        time::Duration,
    };

    use chirp_app::{AppEvent, KeyInput};
    use chirp_core::{Contact, Directory, NaiveDateTime, ReplyConfig};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Ms(u64);

    impl std::ops::Sub for Ms {
        type Output = Duration;

        fn sub(self, rhs: Self) -> Duration {
            Duration::from_millis(self.0 - rhs.0)
        }
    }

    #[derive(Debug, Clone, Default)]
    struct TestEnv(Arc<AtomicU64>);

    impl Environment for TestEnv {
        type Instant = Ms;

        fn now(&self) -> Ms {
            Ms(self.0.load(Ordering::SeqCst))
        }

        fn local_now(&self) -> NaiveDateTime {
            NaiveDateTime::default()
        }
    }

    fn app() -> (App<TestEnv>, TestEnv) {
        let env = TestEnv::default();
        let directory = Directory::from_contacts(vec![
            Contact::new(1, "Ana").with_presence(true, "online").with_last_message("See you"),
            Contact::new(2, "Netstat Bob").with_last_message("Port taken"),
        ])
        .unwrap();
        (App::new(env.clone(), directory, ReplyConfig::default()), env)
    }

    fn draw(app: &App<TestEnv>) -> (String, ClickMap) {
        let mut terminal = Terminal::new(TestBackend::new(90, 20)).unwrap();
        let mut clicks = ClickMap::default();
        terminal
            .draw(|frame| {
                clicks = render(frame, app);
            })
            .unwrap();
        (buffer_text(terminal.backend().buffer()), clicks)
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_selection_shows_placeholder() {
        let (app, _) = app();
        let (text, _) = draw(&app);

        assert!(text.contains("Select a contact to start chatting"));
        assert!(text.contains("Netstat Bob"));
        assert!(text.contains("2 contacts"));
    }

    #[test]
    fn no_match_shows_empty_state() {
        let (mut app, _) = app();
        app.directory_view_mut().set_query("zzz-nomatch");
        let (text, clicks) = draw(&app);

        assert!(text.contains("No contacts found"));
        assert!(!text.contains("Netstat Bob"));
        assert_eq!(clicks, ClickMap::default());
    }

    #[test]
    fn click_map_points_at_rendered_entries() {
        let (app, _) = app();
        let (_, clicks) = draw(&app);

        let ids: Vec<_> = clicks.entries.iter().map(|(_, id)| id.0).collect();
        assert_eq!(ids, [1, 2]);

        let (area, _) = clicks.entries[1];
        assert_eq!(clicks.contact_at(area.x, area.y), Some(ContactId(2)));
        assert_eq!(clicks.contact_at(0, 0), None);
    }

    #[test]
    fn conversation_shows_typing_and_reply() {
        let (mut app, env) = app();
        let _ = app.handle(AppEvent::SelectContact { contact_id: ContactId(1) });
        for c in "hello there".chars() {
            let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
        let _ = app.handle(AppEvent::Key(KeyInput::Enter));

        let (text, _) = draw(&app);
        assert!(text.contains("hello there"));
        assert!(text.contains("online"));

        env.0.store(700, Ordering::SeqCst);
        let _ = app.handle(AppEvent::Tick);
        let (text, _) = draw(&app);
        assert!(text.contains("typing..."));

        env.0.store(2200, Ordering::SeqCst);
        let _ = app.handle(AppEvent::Tick);
        let (text, _) = draw(&app);
        assert!(!text.contains("typing..."));
        assert!(text.contains("Thanks for your message!"));
    }

    #[test]
    fn scrolling_back_reaches_first_message() {
        let (mut app, _) = app();
        let _ = app.handle(AppEvent::SelectContact { contact_id: ContactId(1) });
        for i in 0..30 {
            for c in format!("msg{i:02}").chars() {
                let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
            }
            let _ = app.handle(AppEvent::Key(KeyInput::Enter));
        }

        let (text, _) = draw(&app);
        assert!(text.contains("msg29"));
        assert!(!text.contains("msg00"));

        for _ in 0..50 {
            let _ = app.handle(AppEvent::Key(KeyInput::PageUp));
        }
        let (text, _) = draw(&app);
        assert!(text.contains("msg00"));
        assert!(!text.contains("msg29"));

        let _ = app.handle(AppEvent::Key(KeyInput::PageDown));
        let _ = app.handle(AppEvent::Key(KeyInput::PageDown));
        let (text, _) = draw(&app);
        assert!(!text.contains("msg00"));
    }
}
