//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the App at a point in time.
//! Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use std::collections::BTreeSet;

use chirp_app::App;
use chirp_core::{ContactId, Environment, MessageId};

/// Snapshot of the App's observable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppSnapshot {
    /// Ids present in the seed directory.
    pub directory: BTreeSet<ContactId>,
    /// Active contact. `None` if nothing is selected.
    pub active_contact: Option<ContactId>,
    /// Active conversation, if any.
    pub conversation: Option<ConversationSnapshot>,
    /// Ids the directory view currently lists.
    pub visible: Vec<ContactId>,
}

impl AppSnapshot {
    /// Capture the App's current state.
    pub fn from_app<E: Environment>(app: &App<E>) -> Self {
        let conversation = app.conversation().map(|view| ConversationSnapshot {
            contact_id: view.contact_id(),
            message_ids: view.messages().iter().map(|m| m.id).collect(),
            peer_typing: view.is_peer_typing(),
            pending_replies: view.pending_replies(),
        });

        Self {
            directory: app.directory().contacts().iter().map(|c| c.id).collect(),
            active_contact: app.active_contact(),
            conversation,
            visible: app.visible_contacts().iter().map(|c| c.id).collect(),
        }
    }
}

/// Snapshot of the active conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationSnapshot {
    /// Contact the conversation belongs to.
    pub contact_id: ContactId,
    /// Message ids in display order.
    pub message_ids: Vec<MessageId>,
    /// Whether the typing indicator is shown.
    pub peer_typing: bool,
    /// Replies not yet delivered.
    pub pending_replies: usize,
}
