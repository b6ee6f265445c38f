//! Invariants over chat sessions.
//!
//! A single step (key press, click, clock tick) can move the active contact,
//! grow the message list and flip the typing indicator at once. After every
//! step the harness takes an [`AppSnapshot`] and runs each [`Invariant`]
//! against it.
//!
//! ```ignore
//! let invariants = InvariantRegistry::standard();
//! invariants.assert_all(&AppSnapshot::from_app(&app), "after send");
//! ```

mod checks;
mod snapshot;

use std::fmt;

pub use checks::{
    ActiveContactExists, MessageIdsIncreasing, TypingOnlyWhilePending, VisibleSubsetOfDirectory,
};
pub use snapshot::{AppSnapshot, ConversationSnapshot};

/// Result of one check.
pub type InvariantResult = Result<(), Violation>;

/// A failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Check that failed.
    pub invariant: &'static str,
    /// What the snapshot showed.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property every [`AppSnapshot`] must satisfy.
pub trait Invariant: Send + Sync {
    /// Name used in violation reports.
    fn name(&self) -> &'static str;

    /// Check the snapshot.
    fn check(&self, state: &AppSnapshot) -> InvariantResult;
}

/// The checks run after each step.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl InvariantRegistry {
    /// Checks for a chat session:
    /// - [`ActiveContactExists`]: the selection is a known contact and owns
    ///   the open conversation
    /// - [`MessageIdsIncreasing`]: ids never repeat or go backwards
    /// - [`TypingOnlyWhilePending`]: "typing..." implies a reply is on its way
    /// - [`VisibleSubsetOfDirectory`]: search never lists unknown contacts
    pub fn standard() -> Self {
        Self {
            invariants: vec![
                Box::new(ActiveContactExists),
                Box::new(MessageIdsIncreasing),
                Box::new(TypingOnlyWhilePending),
                Box::new(VisibleSubsetOfDirectory),
            ],
        }
    }

    /// Add a scenario-specific check.
    #[must_use]
    pub fn with(mut self, invariant: impl Invariant + 'static) -> Self {
        self.invariants.push(Box::new(invariant));
        self
    }

    /// Names of the registered checks, in run order.
    pub fn names(&self) -> Vec<&'static str> {
        self.invariants.iter().map(|i| i.name()).collect()
    }

    /// Run every check, collecting all violations.
    pub fn check_all(&self, state: &AppSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|i| i.check(state).err()).collect();
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Run every check and panic with the session state on failure.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &AppSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!(
                "invariant violation {context} ({})\n  {}",
                describe(state),
                messages.join("\n  ")
            );
        }
    }
}

/// One-line summary of the session for failure reports.
fn describe(state: &AppSnapshot) -> String {
    let active = state.active_contact.map_or_else(|| "none".to_owned(), |id| id.to_string());
    match &state.conversation {
        Some(c) => format!(
            "active contact {active}, {} messages, {} pending replies, typing {}",
            c.message_ids.len(),
            c.pending_replies,
            c.peer_typing
        ),
        None => format!("active contact {active}, {} contacts listed", state.visible.len()),
    }
}

#[cfg(test)]
mod tests {
    use chirp_core::{ContactId, MessageId};

    use super::*;

    struct NothingSelected;

    impl Invariant for NothingSelected {
        fn name(&self) -> &'static str {
            "NothingSelected"
        }

        fn check(&self, state: &AppSnapshot) -> InvariantResult {
            match state.active_contact {
                Some(id) => {
                    Err(Violation { invariant: self.name(), message: format!("{id} selected") })
                },
                None => Ok(()),
            }
        }
    }

    fn selected() -> AppSnapshot {
        AppSnapshot {
            directory: [ContactId(1)].into(),
            active_contact: Some(ContactId(1)),
            conversation: Some(ConversationSnapshot {
                contact_id: ContactId(1),
                message_ids: vec![MessageId(1), MessageId(2)],
                peer_typing: true,
                pending_replies: 1,
            }),
            visible: vec![ContactId(1)],
        }
    }

    #[test]
    fn standard_checks_run_in_order() {
        assert_eq!(InvariantRegistry::standard().names(), [
            "ActiveContactExists",
            "MessageIdsIncreasing",
            "TypingOnlyWhilePending",
            "VisibleSubsetOfDirectory"
        ]);
    }

    #[test]
    fn consistent_sessions_pass() {
        let invariants = InvariantRegistry::standard();
        assert!(invariants.check_all(&AppSnapshot::default()).is_ok());
        assert!(invariants.check_all(&selected()).is_ok());
    }

    #[test]
    fn extra_check_reports_its_violation() {
        let invariants = InvariantRegistry::standard().with(NothingSelected);

        let violations = invariants.check_all(&selected()).unwrap_err();
        assert_eq!(violations, [Violation {
            invariant: "NothingSelected",
            message: "1 selected".into()
        }]);
    }

    #[test]
    #[should_panic(expected = "active contact 1, 2 messages, 1 pending replies, typing true")]
    fn failure_report_describes_the_session() {
        InvariantRegistry::standard().with(NothingSelected).assert_all(&selected(), "after select");
    }
}
