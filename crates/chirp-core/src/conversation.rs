//! Conversation session state.
//!
//! A [`Conversation`] is derived from one contact's seed history and owns
//! everything that changes while the contact is displayed: appended
//! messages, the id counter, and the outstanding simulated replies.
//! Dropping it (or calling [`Conversation::close`]) ends the session.

use chrono::NaiveDateTime;

use crate::{
    env::Instant,
    model::{Contact, ContactId, Message, MessageId},
    reply::{ReplyConfig, ReplySchedule, ReplyTicket, ReplyTransition},
    timefmt,
};

/// Observable change produced by advancing a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationChange {
    /// The typing indicator switched on or off.
    Typing(bool),
    /// A simulated reply was appended.
    ReplyAppended(MessageId),
}

/// Message history and pending replies for the active contact.
#[derive(Debug, Clone)]
pub struct Conversation<I> {
    contact_id: ContactId,
    messages: Vec<Message>,
    next_id: Option<MessageId>,
    replies: ReplySchedule<I>,
}

impl<I: Instant> Conversation<I> {
    /// Start a session from the contact's seed history.
    pub fn open(contact: &Contact, config: ReplyConfig) -> Self {
        let next_id = contact.messages.last().map_or(Some(MessageId(1)), |m| m.id.next());
        Self {
            contact_id: contact.id,
            messages: contact.messages.clone(),
            next_id,
            replies: ReplySchedule::new(config),
        }
    }

    /// Contact this session belongs to.
    pub fn contact_id(&self) -> ContactId {
        self.contact_id
    }

    /// Displayed messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether the simulated peer is typing.
    pub fn is_peer_typing(&self) -> bool {
        self.replies.is_typing()
    }

    /// Number of replies not yet delivered.
    pub fn pending_replies(&self) -> usize {
        self.replies.pending()
    }

    /// Append an outgoing message and schedule its reply.
    ///
    /// Blank or whitespace-only text is rejected and returns `None`; the
    /// session is left untouched. So is any send after the last message id
    /// has been handed out.
    pub fn send(&mut self, text: &str, now: I, local: NaiveDateTime) -> Option<MessageId> {
        if text.trim().is_empty() {
            return None;
        }

        let Some(id) = self.allocate_id() else {
            tracing::warn!(contact = %self.contact_id, "message ids exhausted, send dropped");
            return None;
        };
        self.messages.push(Message::outgoing(id, text, timefmt::clock_label(local)));
        let ticket = self.replies.schedule(now);

        tracing::debug!(contact = %self.contact_id, message = %id, ?ticket, "message sent");
        Some(id)
    }

    /// Advance reply timers to `now`.
    ///
    /// Returns the visible changes in the order they happened. The typing
    /// flag is reported only when its value actually flips.
    pub fn advance(&mut self, now: I, local: NaiveDateTime) -> Vec<ConversationChange> {
        let was_typing = self.replies.is_typing();
        let transitions = self.replies.poll(now);
        if transitions.is_empty() {
            return Vec::new();
        }

        let mut changes = Vec::new();
        let started = transitions.iter().any(|t| matches!(t, ReplyTransition::TypingStarted(_)));
        if started && !was_typing {
            changes.push(ConversationChange::Typing(true));
        }

        for transition in transitions {
            if let ReplyTransition::ReplyDue(ticket) = transition
                && let Some(id) = self.append_reply(ticket, local)
            {
                changes.push(ConversationChange::ReplyAppended(id));
            }
        }

        let shown = was_typing || started;
        let is_typing = self.replies.is_typing();
        if shown != is_typing {
            changes.push(ConversationChange::Typing(is_typing));
        }

        changes
    }

    /// Cancel all outstanding replies, returning how many were dropped.
    pub fn close(&mut self) -> usize {
        let cancelled = self.replies.cancel_all();
        if cancelled > 0 {
            tracing::debug!(contact = %self.contact_id, cancelled, "cancelled pending replies");
        }
        cancelled
    }

    fn append_reply(&mut self, ticket: ReplyTicket, local: NaiveDateTime) -> Option<MessageId> {
        let Some(id) = self.allocate_id() else {
            tracing::warn!(
                contact = %self.contact_id,
                ?ticket,
                "message ids exhausted, reply dropped"
            );
            return None;
        };
        let text = self.replies.config().reply_text().to_string();
        self.messages.push(Message::incoming(id, text, timefmt::clock_label(local)));
        tracing::debug!(contact = %self.contact_id, message = %id, ?ticket, "simulated reply");
        Some(id)
    }

    fn allocate_id(&mut self) -> Option<MessageId> {
        let id = self.next_id?;
        self.next_id = id.next();
        Some(id)
    }
}
