//! Observable application state types.
//!
//! These structures serve as the "View Model" for the application: the
//! renderer reads them, only the [`crate::App`] state machine writes them.

use chirp_core::ContactId;

use crate::ConversationView;

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Contact list (search query, highlight).
    #[default]
    Directory,
    /// Conversation (composer, scrolling).
    Conversation,
}

impl Focus {
    /// The other pane.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Directory => Self::Conversation,
            Self::Conversation => Self::Directory,
        }
    }
}

/// Active-contact state machine.
///
/// `None -> Viewing(contact)` on selection; switching contacts replaces the
/// view wholesale, closing the previous one first.
#[derive(Debug, Clone)]
pub enum Selection<I> {
    /// No contact selected.
    None,
    /// A contact's conversation is displayed.
    Viewing(ConversationView<I>),
}

impl<I> Selection<I> {
    /// Conversation view. `None` if no contact is selected.
    pub fn view(&self) -> Option<&ConversationView<I>> {
        match self {
            Self::None => None,
            Self::Viewing(view) => Some(view),
        }
    }

    /// Mutable conversation view. `None` if no contact is selected.
    pub fn view_mut(&mut self) -> Option<&mut ConversationView<I>> {
        match self {
            Self::None => None,
            Self::Viewing(view) => Some(view),
        }
    }
}

impl<I: chirp_core::Instant> Selection<I> {
    /// Selected contact id. `None` if no contact is selected.
    pub fn contact_id(&self) -> Option<ContactId> {
        self.view().map(ConversationView::contact_id)
    }
}
