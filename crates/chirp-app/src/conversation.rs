//! Conversation view state.
//!
//! Wraps a [`Conversation`] session with the composer input and the scroll
//! position of the message list. The list follows the latest content: any
//! change to the message sequence or the typing flag snaps it back to the
//! bottom, discarding a manual scroll.

use chirp_core::{
    Contact, ContactId, Conversation, ConversationChange, Instant, Message, MessageId,
    NaiveDateTime, ReplyConfig, model::TODAY,
};

use crate::{KeyInput, TextInput};

/// Messages moved by Page Up / Page Down.
const PAGE: usize = 5;

/// Result of feeding a key to the conversation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationOutcome {
    /// Key not handled by the view.
    Ignored,
    /// View state changed; re-render.
    Updated,
    /// A message was sent.
    Sent(MessageId),
}

/// Per-contact conversation view.
#[derive(Debug, Clone)]
pub struct ConversationView<I> {
    session: Conversation<I>,
    composer: TextInput,
    scroll_back: usize,
}

impl<I: Instant> ConversationView<I> {
    /// Open a fresh view on the contact's seed history.
    pub fn open(contact: &Contact, config: ReplyConfig) -> Self {
        Self {
            session: Conversation::open(contact, config),
            composer: TextInput::new(),
            scroll_back: 0,
        }
    }

    /// Contact being displayed.
    pub fn contact_id(&self) -> ContactId {
        self.session.contact_id()
    }

    /// Displayed messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    /// Whether the typing indicator is shown.
    pub fn is_peer_typing(&self) -> bool {
        self.session.is_peer_typing()
    }

    /// Replies not yet delivered.
    pub fn pending_replies(&self) -> usize {
        self.session.pending_replies()
    }

    /// Composer input.
    pub fn composer(&self) -> &TextInput {
        &self.composer
    }

    /// Date separator shown above the messages.
    pub fn date_label(&self) -> &str {
        self.messages().first().map_or(TODAY, |m| m.date.as_str())
    }

    /// Messages scrolled back from the latest content. `0` means following;
    /// `messages().len()` puts the first message in view.
    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    /// Submit the composer contents.
    ///
    /// Blank input is a no-op: the composer keeps its text and nothing is
    /// appended.
    pub fn send(&mut self, now: I, local: NaiveDateTime) -> Option<MessageId> {
        if self.composer.text().trim().is_empty() {
            return None;
        }

        let id = self.session.send(self.composer.text(), now, local)?;
        let _ = self.composer.take();
        self.follow_latest();
        Some(id)
    }

    /// Handle a key while the conversation has focus.
    pub fn handle_key(
        &mut self,
        key: KeyInput,
        now: I,
        local: NaiveDateTime,
    ) -> ConversationOutcome {
        match key {
            KeyInput::Enter => {
                self.send(now, local).map_or(ConversationOutcome::Ignored, ConversationOutcome::Sent)
            },
            KeyInput::Up => self.scroll_by(1, true),
            KeyInput::PageUp => self.scroll_by(PAGE, true),
            KeyInput::Down => self.scroll_by(1, false),
            KeyInput::PageDown => self.scroll_by(PAGE, false),
            key if self.composer.edit(key) => ConversationOutcome::Updated,
            _ => ConversationOutcome::Ignored,
        }
    }

    /// Advance reply timers. Any change snaps the list to the bottom.
    pub fn advance(&mut self, now: I, local: NaiveDateTime) -> Vec<ConversationChange> {
        let changes = self.session.advance(now, local);
        if !changes.is_empty() {
            self.follow_latest();
        }
        changes
    }

    /// Cancel outstanding replies before the view is discarded.
    pub fn close(&mut self) -> usize {
        self.session.close()
    }

    fn scroll_by(&mut self, lines: usize, back: bool) -> ConversationOutcome {
        let max = self.messages().len();
        self.scroll_back = if back {
            self.scroll_back.saturating_add(lines).min(max)
        } else {
            self.scroll_back.saturating_sub(lines)
        };
        ConversationOutcome::Updated
    }

    fn follow_latest(&mut self) {
        self.scroll_back = 0;
    }
}
