//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine: user interactions (keyboard, pointer
//! selection, resize) and the periodic tick that advances reply timers.

use chirp_core::ContactId;

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick. Advances simulated replies to the current time.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// A directory entry was clicked.
    SelectContact {
        /// Contact to display.
        contact_id: ContactId,
    },

    /// Close the active conversation.
    CloseConversation,
}
