//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard and mouse events and ratatui for rendering.

use std::io::{self, Stdout, stdout};

use chirp_app::{App, AppEvent, Driver, KeyInput};
use chirp_core::Environment;
use crossterm::{
    ExecutableCommand,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::{
    logging::LogError,
    ui::{self, ClickMap},
};

/// Idle wait before the driver yields so the runtime can tick.
const TICK_INTERVAL: tokio::time::Duration = tokio::time::Duration::from_millis(100);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Log file setup failed.
    #[error(transparent)]
    Log(#[from] LogError),

    /// Crossterm stopped delivering terminal events.
    #[error("terminal event stream closed")]
    StreamClosed,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the raw-mode terminal for its whole lifetime and restores it on
/// drop. Remembers where the last frame drew each contact so mouse clicks
/// can select them.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    clicks: ClickMap,
}

impl TerminalDriver {
    /// Enter raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be configured.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, clicks: ClickMap::default() })
    }

    /// Convert a crossterm key event to `KeyInput`.
    fn convert_key(event: KeyEvent) -> Option<KeyInput> {
        if event.modifiers.contains(KeyModifiers::CONTROL)
            && let KeyCode::Char(c) = event.code
        {
            return Some(KeyInput::Ctrl(c.to_ascii_lowercase()));
        }

        match event.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter if event.modifiers.is_empty() => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::PageUp => Some(KeyInput::PageUp),
            KeyCode::PageDown => Some(KeyInput::PageDown),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    fn convert_mouse(clicks: &ClickMap, event: MouseEvent) -> Option<AppEvent> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => clicks
                .contact_at(event.column, event.row)
                .map(|contact_id| AppEvent::SelectContact { contact_id }),
            _ => None,
        }
    }

    /// Convert the next item of the crossterm event stream. A finished
    /// stream is an error: it never yields again.
    fn convert_event(
        clicks: &ClickMap,
        event: Option<io::Result<Event>>,
    ) -> Result<Option<AppEvent>, TerminalError> {
        match event {
            Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                Ok(Self::convert_key(key_event).map(AppEvent::Key))
            },
            Some(Ok(Event::Mouse(mouse_event))) => Ok(Self::convert_mouse(clicks, mouse_event)),
            Some(Ok(Event::Resize(cols, rows))) => Ok(Some(AppEvent::Resize(cols, rows))),
            Some(Ok(_)) => Ok(None),
            Some(Err(e)) => Err(TerminalError::Io(e)),
            None => Err(TerminalError::StreamClosed),
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        tokio::select! {
            biased;

            maybe_event = self.event_stream.next() => {
                Self::convert_event(&self.clicks, maybe_event)
            }

            () = tokio::time::sleep(TICK_INTERVAL) => Ok(None),
        }
    }

    fn render<E: Environment>(&mut self, app: &App<E>) -> Result<(), Self::Error> {
        let mut clicks = ClickMap::default();
        self.terminal.draw(|frame| {
            clicks = ui::render(frame, app);
        })?;
        self.clicks = clicks;
        Ok(())
    }

    fn stop(&mut self) {
        let _ = self.terminal.show_cursor();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = stdout().execute(DisableMouseCapture);
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
