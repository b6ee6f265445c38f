//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use super::{AppSnapshot, Invariant, InvariantResult, Violation};

/// Active contact must exist in the directory and own the conversation.
///
/// If `active_contact` is `Some(id)`, the directory contains `id` and the
/// open conversation belongs to it. If it is `None`, no conversation is
/// open.
pub struct ActiveContactExists;

impl Invariant for ActiveContactExists {
    fn name(&self) -> &'static str {
        "ActiveContactExists"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let conversation_contact = state.conversation.as_ref().map(|c| c.contact_id);
        if state.active_contact != conversation_contact {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "active contact {:?} but conversation belongs to {:?}",
                    state.active_contact, conversation_contact
                ),
            });
        }

        if let Some(active) = state.active_contact
            && !state.directory.contains(&active)
        {
            return Err(Violation {
                invariant: self.name(),
                message: format!("active contact {active} not in directory {:?}", state.directory),
            });
        }
        Ok(())
    }
}

/// Message ids in a conversation strictly increase.
///
/// Ids are unique within the conversation and new messages always sort
/// after existing ones.
pub struct MessageIdsIncreasing;

impl Invariant for MessageIdsIncreasing {
    fn name(&self) -> &'static str {
        "MessageIdsIncreasing"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let Some(conversation) = &state.conversation else {
            return Ok(());
        };

        for window in conversation.message_ids.windows(2) {
            if window[1] <= window[0] {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "contact {}: message id {} follows {}",
                        conversation.contact_id, window[1], window[0]
                    ),
                });
            }
        }
        Ok(())
    }
}

/// The typing indicator is shown only while a reply is outstanding.
pub struct TypingOnlyWhilePending;

impl Invariant for TypingOnlyWhilePending {
    fn name(&self) -> &'static str {
        "TypingOnlyWhilePending"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        match &state.conversation {
            Some(c) if c.peer_typing && c.pending_replies == 0 => Err(Violation {
                invariant: self.name(),
                message: format!("contact {}: typing with no pending reply", c.contact_id),
            }),
            _ => Ok(()),
        }
    }
}

/// Every listed contact comes from the directory, without repeats.
pub struct VisibleSubsetOfDirectory;

impl Invariant for VisibleSubsetOfDirectory {
    fn name(&self) -> &'static str {
        "VisibleSubsetOfDirectory"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let mut seen = std::collections::BTreeSet::new();
        for id in &state.visible {
            if !state.directory.contains(id) || !seen.insert(*id) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("listed contact {id} is unknown or repeated"),
                });
            }
        }
        Ok(())
    }
}
