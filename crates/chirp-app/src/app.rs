//! Application state machine.
//!
//! This module defines the [`App`] state machine, the coordinator that holds
//! the single piece of shared state (which contact is active) and routes
//! input to the directory and conversation views.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//! Time is read from the [`Environment`], so simulations drive it with a
//! virtual clock.
//!
//! # Responsibilities
//!
//! - Owns the seed directory and the directory view (query, filter,
//!   highlight).
//! - Tracks the active contact as an explicit `None -> Viewing` state and
//!   rebuilds the conversation from the contact id on every switch.
//! - Cancels outstanding simulated replies whenever a conversation is
//!   discarded (switch, close, quit).
//! - Tracks keyboard focus, terminal size and a transient status line.

use chirp_core::{Contact, ContactId, Directory, Environment, ReplyConfig};

use crate::{
    AppAction, AppEvent, ConversationOutcome, ConversationView, DirectoryOutcome, DirectoryView,
    Focus, KeyInput, Selection,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
pub struct App<E: Environment> {
    env: E,
    directory: Directory,
    reply_config: ReplyConfig,
    directory_view: DirectoryView,
    selection: Selection<E::Instant>,
    focus: Focus,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl<E: Environment> App<E> {
    /// Create an App over a seed directory with no contact selected.
    pub fn new(env: E, directory: Directory, reply_config: ReplyConfig) -> Self {
        Self {
            env,
            directory,
            reply_config,
            directory_view: DirectoryView::new(),
            selection: Selection::None,
            focus: Focus::Directory,
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => self.tick(),
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::SelectContact { contact_id } => self.select_contact(contact_id),
            AppEvent::CloseConversation => self.close_conversation(),
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc | KeyInput::Ctrl('c') => return self.quit(),
            KeyInput::Ctrl('w') => return self.close_conversation(),
            KeyInput::Tab => return self.toggle_focus(),
            _ => {},
        }

        match self.focus {
            Focus::Directory => match self.directory_view.handle_key(key, &self.directory) {
                DirectoryOutcome::Ignored => vec![],
                DirectoryOutcome::Updated => vec![AppAction::Render],
                DirectoryOutcome::Selected(contact_id) => self.select_contact(contact_id),
            },
            Focus::Conversation => {
                let now = self.env.now();
                let local = self.env.local_now();
                let Some(view) = self.selection.view_mut() else {
                    return vec![];
                };
                match view.handle_key(key, now, local) {
                    ConversationOutcome::Ignored => vec![],
                    ConversationOutcome::Updated | ConversationOutcome::Sent(_) => {
                        vec![AppAction::Render]
                    },
                }
            },
        }
    }

    /// Advance simulated replies of the active conversation.
    fn tick(&mut self) -> Vec<AppAction> {
        let now = self.env.now();
        let local = self.env.local_now();
        let Some(view) = self.selection.view_mut() else {
            return vec![];
        };

        let changes = view.advance(now, local);
        if changes.is_empty() {
            return vec![];
        }
        tracing::trace!(contact = %view.contact_id(), ?changes, "conversation advanced");
        vec![AppAction::Render]
    }

    /// Make `contact_id` the active contact.
    ///
    /// Switching away from another contact cancels its pending replies and
    /// rebuilds the conversation from the new contact's seed history.
    /// Re-selecting the active contact keeps its session. Unknown ids leave
    /// the state unchanged.
    pub fn select_contact(&mut self, contact_id: ContactId) -> Vec<AppAction> {
        let Some(contact) = self.directory.get(contact_id) else {
            tracing::warn!(contact = %contact_id, "selection of unknown contact ignored");
            self.status_message = Some(format!("Unknown contact {contact_id}"));
            return vec![AppAction::Render];
        };

        self.focus = Focus::Conversation;
        if self.selection.contact_id() == Some(contact_id) {
            return vec![AppAction::Render];
        }

        if let Some(previous) = self.selection.view_mut() {
            let cancelled = previous.close();
            tracing::debug!(contact = %previous.contact_id(), cancelled, "conversation closed");
        }

        self.selection =
            Selection::Viewing(ConversationView::open(contact, self.reply_config.clone()));
        self.status_message = None;
        tracing::info!(contact = %contact_id, name = %contact.name, "conversation opened");
        vec![AppAction::Render]
    }

    /// Return to the no-contact state, cancelling pending replies.
    pub fn close_conversation(&mut self) -> Vec<AppAction> {
        if let Some(view) = self.selection.view_mut() {
            let cancelled = view.close();
            tracing::info!(contact = %view.contact_id(), cancelled, "conversation closed");
        }
        self.selection = Selection::None;
        self.focus = Focus::Directory;
        vec![AppAction::Render]
    }

    /// Quit the application, cancelling pending replies.
    pub fn quit(&mut self) -> Vec<AppAction> {
        if let Some(view) = self.selection.view_mut() {
            let cancelled = view.close();
            tracing::debug!(contact = %view.contact_id(), cancelled, "shutting down");
        }
        vec![AppAction::Quit]
    }

    fn toggle_focus(&mut self) -> Vec<AppAction> {
        let next = self.focus.toggled();
        if next == Focus::Conversation && self.active_contact().is_none() {
            self.status_message = Some("Select a contact first".into());
        } else {
            self.focus = next;
        }
        vec![AppAction::Render]
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Environment supplying time.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Seed directory.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Directory view state (query, filter, highlight).
    pub fn directory_view(&self) -> &DirectoryView {
        &self.directory_view
    }

    /// Mutable directory view, for frontends that set the query directly.
    pub fn directory_view_mut(&mut self) -> &mut DirectoryView {
        &mut self.directory_view
    }

    /// Contacts currently listed by the directory view.
    pub fn visible_contacts(&self) -> Vec<&Contact> {
        self.directory_view.visible(&self.directory)
    }

    /// Active-contact state.
    pub fn selection(&self) -> &Selection<E::Instant> {
        &self.selection
    }

    /// Active contact id. `None` if no contact is selected.
    pub fn active_contact(&self) -> Option<ContactId> {
        self.selection.contact_id()
    }

    /// Active contact record. `None` if no contact is selected.
    pub fn active_contact_record(&self) -> Option<&Contact> {
        self.active_contact().and_then(|id| self.directory.get(id))
    }

    /// Conversation view of the active contact. `None` if no contact is
    /// selected.
    pub fn conversation(&self) -> Option<&ConversationView<E::Instant>> {
        self.selection.view()
    }

    /// Pane receiving keyboard input.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
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

    use chirp_core::{Contact, DeliveryStatus, NaiveDateTime};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Ms(u64);

    impl std::ops::Sub for Ms {
        type Output = Duration;

        fn sub(self, rhs: Self) -> Duration {
            Duration::from_millis(self.0 - rhs.0)
        }
    }

    /// Manually advanced clock.
    #[derive(Debug, Clone, Default)]
    struct TestEnv(Arc<AtomicU64>);

    impl TestEnv {
        fn advance(&self, ms: u64) {
            self.0.fetch_add(ms, Ordering::SeqCst);
        }
    }

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
            Contact::new(1, "Ana"),
            Contact::new(2, "Bo").with_messages(vec![chirp_core::Message::incoming(
                chirp_core::MessageId(1),
                "yo",
                "09:00 AM",
            )]),
        ])
        .unwrap();
        (App::new(env.clone(), directory, ReplyConfig::default()), env)
    }

    fn type_text(app: &mut App<TestEnv>, text: &str) {
        for c in text.chars() {
            let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
    }

    #[test]
    fn starts_with_no_contact() {
        let (app, _) = app();

        assert_eq!(app.active_contact(), None);
        assert!(app.conversation().is_none());
        assert_eq!(app.focus(), Focus::Directory);
    }

    #[test]
    fn select_opens_seed_history_and_focuses_conversation() {
        let (mut app, _) = app();

        let actions = app.handle(AppEvent::SelectContact { contact_id: ContactId(2) });

        assert_eq!(actions, [AppAction::Render]);
        assert_eq!(app.active_contact(), Some(ContactId(2)));
        assert_eq!(app.conversation().map(|c| c.messages().len()), Some(1));
        assert_eq!(app.focus(), Focus::Conversation);
        assert_eq!(app.active_contact_record().map(|c| c.name.as_str()), Some("Bo"));
    }

    #[test]
    fn enter_in_directory_selects_highlighted_contact() {
        let (mut app, _) = app();
        let _ = app.handle(AppEvent::Key(KeyInput::Down));
        let _ = app.handle(AppEvent::Key(KeyInput::Enter));

        assert_eq!(app.active_contact(), Some(ContactId(2)));
    }

    #[test]
    fn unknown_contact_is_ignored() {
        let (mut app, _) = app();
        let _ = app.handle(AppEvent::SelectContact { contact_id: ContactId(1) });

        let _ = app.handle(AppEvent::SelectContact { contact_id: ContactId(99) });

        assert_eq!(app.active_contact(), Some(ContactId(1)));
        assert_eq!(app.status_message(), Some("Unknown contact 99"));
    }

    #[test]
    fn send_and_simulated_reply() {
        let (mut app, env) = app();
        let _ = app.handle(AppEvent::SelectContact { contact_id: ContactId(1) });
        type_text(&mut app, "hi");

        let actions = app.handle(AppEvent::Key(KeyInput::Enter));
        assert_eq!(actions, [AppAction::Render]);

        env.advance(700);
        assert_eq!(app.handle(AppEvent::Tick), [AppAction::Render]);
        assert!(app.conversation().is_some_and(ConversationView::is_peer_typing));

        env.advance(1500);
        let _ = app.handle(AppEvent::Tick);
        let conversation = app.conversation().unwrap();
        assert!(!conversation.is_peer_typing());
        assert_eq!(conversation.messages().len(), 2);
        assert_eq!(conversation.messages()[1].status, DeliveryStatus::Delivered);
    }

    #[test]
    fn idle_tick_does_not_render() {
        let (mut app, _) = app();
        assert!(app.handle(AppEvent::Tick).is_empty());

        let _ = app.handle(AppEvent::SelectContact { contact_id: ContactId(1) });
        assert!(app.handle(AppEvent::Tick).is_empty());
    }

    #[test]
    fn switching_contacts_cancels_pending_reply() {
        let (mut app, env) = app();
        let _ = app.handle(AppEvent::SelectContact { contact_id: ContactId(1) });
        type_text(&mut app, "hi");
        let _ = app.handle(AppEvent::Key(KeyInput::Enter));
        env.advance(1000);
        let _ = app.handle(AppEvent::Tick);

        let _ = app.handle(AppEvent::SelectContact { contact_id: ContactId(2) });
        env.advance(5000);
        let _ = app.handle(AppEvent::Tick);

        let conversation = app.conversation().unwrap();
        assert_eq!(conversation.messages().len(), 1);
        assert!(!conversation.is_peer_typing());
        assert_eq!(conversation.pending_replies(), 0);
    }

    #[test]
    fn reselecting_active_contact_keeps_session() {
        let (mut app, _) = app();
        let _ = app.handle(AppEvent::SelectContact { contact_id: ContactId(1) });
        type_text(&mut app, "hi");
        let _ = app.handle(AppEvent::Key(KeyInput::Enter));

        let _ = app.handle(AppEvent::SelectContact { contact_id: ContactId(1) });

        assert_eq!(app.conversation().map(|c| c.messages().len()), Some(1));
    }

    #[test]
    fn tab_requires_a_contact_before_focusing_conversation() {
        let (mut app, _) = app();
        let _ = app.handle(AppEvent::Key(KeyInput::Tab));
        assert_eq!(app.focus(), Focus::Directory);
        assert!(app.status_message().is_some());

        let _ = app.handle(AppEvent::SelectContact { contact_id: ContactId(1) });
        let _ = app.handle(AppEvent::Key(KeyInput::Tab));
        assert_eq!(app.focus(), Focus::Directory);
        let _ = app.handle(AppEvent::Key(KeyInput::Tab));
        assert_eq!(app.focus(), Focus::Conversation);
    }

    #[test]
    fn ctrl_w_closes_conversation() {
        let (mut app, _) = app();
        let _ = app.handle(AppEvent::SelectContact { contact_id: ContactId(1) });

        let _ = app.handle(AppEvent::Key(KeyInput::Ctrl('w')));

        assert_eq!(app.active_contact(), None);
        assert_eq!(app.focus(), Focus::Directory);
    }

    #[test]
    fn esc_quits() {
        let (mut app, _) = app();
        let actions = app.handle(AppEvent::Key(KeyInput::Esc));
        assert_eq!(actions, [AppAction::Quit]);
    }

    #[test]
    fn resize_updates_terminal_size() {
        let (mut app, _) = app();
        let actions = app.handle(AppEvent::Resize(120, 40));

        assert_eq!(actions, [AppAction::Render]);
        assert_eq!(app.terminal_size(), (120, 40));
    }
}
