//! Simulated peer replies.
//!
//! Every outgoing message schedules one reply. A reply is data, not a
//! callback: a ticket plus the instant its message was sent. The owner
//! polls the schedule with the current time and applies the transitions it
//! returns. Cancelling a reply is dropping its entry, so a conversation
//! that is discarded can never be mutated by a stale timer.
//!
//! # Lifecycle
//!
//! ```text
//! send ──► PendingTyping ──(typing_delay)──► Typing ──(reply_delay)──► done
//! ```
//!
//! Delays are measured from the send, so the reply lands `reply_delay`
//! after the send regardless of when the typing phase began.

use std::{collections::VecDeque, time::Duration};

use crate::{env::Instant, error::ConfigError};

/// Default delay between a send and the typing indicator.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(700);

/// Default delay between a send and the reply.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(2200);

/// Default canned reply body.
pub const DEFAULT_REPLY_TEXT: &str = "Thanks for your message! 👍";

/// Timing and content of simulated replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyConfig {
    typing_delay: Duration,
    reply_delay: Duration,
    reply_text: String,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            typing_delay: DEFAULT_TYPING_DELAY,
            reply_delay: DEFAULT_REPLY_DELAY,
            reply_text: DEFAULT_REPLY_TEXT.to_string(),
        }
    }
}

impl ReplyConfig {
    /// Build a validated config.
    ///
    /// `reply_delay` must be strictly greater than `typing_delay` and the
    /// reply text must not be blank.
    pub fn new(
        typing_delay: Duration,
        reply_delay: Duration,
        reply_text: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let reply_text = reply_text.into();
        if reply_delay <= typing_delay {
            return Err(ConfigError::DelayOrder {
                typing_ms: typing_delay.as_millis(),
                reply_ms: reply_delay.as_millis(),
            });
        }
        if reply_text.trim().is_empty() {
            return Err(ConfigError::EmptyReply);
        }
        Ok(Self { typing_delay, reply_delay, reply_text })
    }

    /// Delay from send to the typing indicator.
    pub fn typing_delay(&self) -> Duration {
        self.typing_delay
    }

    /// Delay from send to the reply.
    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Canned reply body.
    pub fn reply_text(&self) -> &str {
        &self.reply_text
    }
}

/// Handle of one scheduled reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReplyTicket(pub u64);

/// Phase of a scheduled reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyPhase {
    /// Waiting for the typing delay.
    PendingTyping,
    /// Peer shown as typing; waiting for the reply delay.
    Typing,
}

/// Transition produced by [`ReplySchedule::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTransition {
    /// The typing delay elapsed.
    TypingStarted(ReplyTicket),
    /// The reply delay elapsed; the reply message is due.
    ReplyDue(ReplyTicket),
}

#[derive(Debug, Clone)]
struct PendingReply<I> {
    ticket: ReplyTicket,
    sent_at: I,
    phase: ReplyPhase,
}

/// Outstanding replies of one conversation, in send order.
#[derive(Debug, Clone)]
pub struct ReplySchedule<I> {
    config: ReplyConfig,
    pending: VecDeque<PendingReply<I>>,
    next_ticket: u64,
}

impl<I: Instant> ReplySchedule<I> {
    /// Create an empty schedule.
    pub fn new(config: ReplyConfig) -> Self {
        Self { config, pending: VecDeque::new(), next_ticket: 1 }
    }

    /// Reply configuration.
    pub fn config(&self) -> &ReplyConfig {
        &self.config
    }

    /// Schedule a reply for a message sent at `sent_at`.
    pub fn schedule(&mut self, sent_at: I) -> ReplyTicket {
        let ticket = ReplyTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.saturating_add(1);
        self.pending.push_back(PendingReply { ticket, sent_at, phase: ReplyPhase::PendingTyping });
        ticket
    }

    /// Advance every reply to `now`, returning transitions in send order.
    ///
    /// A reply whose both deadlines passed since the last poll yields
    /// `TypingStarted` followed by `ReplyDue`. Due replies are removed.
    pub fn poll(&mut self, now: I) -> Vec<ReplyTransition> {
        let mut transitions = Vec::new();
        let typing_delay = self.config.typing_delay;
        let reply_delay = self.config.reply_delay;

        self.pending.retain_mut(|reply| {
            let elapsed = if now > reply.sent_at { now - reply.sent_at } else { Duration::ZERO };

            if reply.phase == ReplyPhase::PendingTyping && elapsed >= typing_delay {
                reply.phase = ReplyPhase::Typing;
                transitions.push(ReplyTransition::TypingStarted(reply.ticket));
            }

            if elapsed >= reply_delay {
                transitions.push(ReplyTransition::ReplyDue(reply.ticket));
                return false;
            }
            true
        });

        transitions
    }

    /// Whether any reply is inside its typing window.
    pub fn is_typing(&self) -> bool {
        self.pending.iter().any(|r| r.phase == ReplyPhase::Typing)
    }

    /// Phase of a scheduled reply. `None` once delivered or cancelled.
    pub fn phase(&self, ticket: ReplyTicket) -> Option<ReplyPhase> {
        self.pending.iter().find(|r| r.ticket == ticket).map(|r| r.phase)
    }

    /// Number of outstanding replies.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Cancel every outstanding reply, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Millisecond instants are enough to drive the schedule.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Ms(u64);

    impl std::ops::Sub for Ms {
        type Output = Duration;

        fn sub(self, rhs: Self) -> Duration {
            Duration::from_millis(self.0 - rhs.0)
        }
    }

    fn schedule() -> ReplySchedule<Ms> {
        ReplySchedule::new(ReplyConfig::default())
    }

    #[test]
    fn config_rejects_reply_before_typing() {
        let result =
            ReplyConfig::new(Duration::from_millis(900), Duration::from_millis(900), "ok");
        assert!(matches!(result, Err(ConfigError::DelayOrder { typing_ms: 900, reply_ms: 900 })));
    }

    #[test]
    fn config_rejects_blank_reply() {
        let result = ReplyConfig::new(Duration::from_millis(1), Duration::from_millis(2), "  ");
        assert_eq!(result, Err(ConfigError::EmptyReply));
    }

    #[test]
    fn reply_walks_through_phases() {
        let mut schedule = schedule();
        let ticket = schedule.schedule(Ms(0));

        assert!(schedule.poll(Ms(699)).is_empty());
        assert!(!schedule.is_typing());

        assert_eq!(schedule.poll(Ms(700)), [ReplyTransition::TypingStarted(ticket)]);
        assert!(schedule.is_typing());
        assert_eq!(schedule.phase(ticket), Some(ReplyPhase::Typing));

        assert!(schedule.poll(Ms(2199)).is_empty());
        assert_eq!(schedule.poll(Ms(2200)), [ReplyTransition::ReplyDue(ticket)]);
        assert!(!schedule.is_typing());
        assert_eq!(schedule.pending(), 0);
        assert_eq!(schedule.phase(ticket), None);
    }

    #[test]
    fn late_poll_yields_both_transitions_in_order() {
        let mut schedule = schedule();
        let ticket = schedule.schedule(Ms(0));

        assert_eq!(schedule.poll(Ms(5000)), [
            ReplyTransition::TypingStarted(ticket),
            ReplyTransition::ReplyDue(ticket)
        ]);
    }

    #[test]
    fn overlapping_replies_keep_typing_until_last_lands() {
        let mut schedule = schedule();
        let first = schedule.schedule(Ms(0));
        let second = schedule.schedule(Ms(1000));

        let _ = schedule.poll(Ms(1700));
        assert!(schedule.is_typing());

        assert_eq!(schedule.poll(Ms(2200)), [ReplyTransition::ReplyDue(first)]);
        assert!(schedule.is_typing(), "second reply is still in its typing window");

        assert_eq!(schedule.poll(Ms(3200)), [ReplyTransition::ReplyDue(second)]);
        assert!(!schedule.is_typing());
    }

    #[test]
    fn cancel_drops_everything() {
        let mut schedule = schedule();
        let _ = schedule.schedule(Ms(0));
        let _ = schedule.schedule(Ms(10));
        let _ = schedule.poll(Ms(800));

        assert_eq!(schedule.cancel_all(), 2);
        assert!(!schedule.is_typing());
        assert!(schedule.poll(Ms(10_000)).is_empty());
    }

    #[test]
    fn tickets_are_unique() {
        let mut schedule = schedule();
        let a = schedule.schedule(Ms(0));
        let b = schedule.schedule(Ms(0));
        assert!(b > a);
    }
}
