//! Contacts and messages.
//!
//! Field names serialize in camelCase (`lastSeen`, `isOnline`,
//! `lastMessage`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label used for messages created during the current session.
pub const TODAY: &str = "Today";

/// Stable contact identifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContactId(pub u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Message identifier, unique within one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl MessageId {
    /// The id following this one, or `None` once the id space is used up.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Delivery status of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Handed off by the sender.
    #[default]
    Sent,
    /// Reached the peer.
    Delivered,
    /// Seen by the peer.
    Read,
}

impl DeliveryStatus {
    /// Check-mark glyph shown next to outgoing messages.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Sent => "✓",
            Self::Delivered | Self::Read => "✓✓",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Read => "read",
        };
        f.write_str(s)
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Conversation-scoped id.
    pub id: MessageId,
    /// Message body, stored as typed.
    pub text: String,
    /// Display timestamp (e.g. `"03:45 PM"`).
    pub time: String,
    /// `true` for messages written by the local user.
    #[serde(rename = "sent")]
    pub outgoing: bool,
    /// Delivery status.
    #[serde(default)]
    pub status: DeliveryStatus,
    /// Day label (e.g. `"Today"`).
    #[serde(default = "today_label")]
    pub date: String,
}

fn today_label() -> String {
    TODAY.to_string()
}

impl Message {
    /// Message written by the local user, not yet delivered.
    pub fn outgoing(id: MessageId, text: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            time: time.into(),
            outgoing: true,
            status: DeliveryStatus::Sent,
            date: today_label(),
        }
    }

    /// Message received from the peer.
    pub fn incoming(id: MessageId, text: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            time: time.into(),
            outgoing: false,
            status: DeliveryStatus::Delivered,
            date: today_label(),
        }
    }
}

/// A conversation peer from the seed directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Unique identity.
    pub id: ContactId,
    /// Display name.
    pub name: String,
    /// Presence text shown in the conversation header. `None` if unknown.
    #[serde(default)]
    pub last_seen: Option<String>,
    /// Whether the contact is currently online.
    #[serde(default)]
    pub is_online: bool,
    /// Preview of the latest message.
    #[serde(default)]
    pub last_message: String,
    /// Raw label of the latest message time. `None` means today.
    #[serde(default)]
    pub last_message_time: Option<String>,
    /// Seed history, oldest first.
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Contact {
    /// Contact with a name and no history.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ContactId(id),
            name: name.into(),
            last_seen: None,
            is_online: false,
            last_message: String::new(),
            last_message_time: None,
            messages: Vec::new(),
        }
    }

    /// Set the last-message preview.
    #[must_use]
    pub fn with_last_message(mut self, text: impl Into<String>) -> Self {
        self.last_message = text.into();
        self
    }

    /// Set the raw last-message time label.
    #[must_use]
    pub fn with_last_message_time(mut self, time: impl Into<String>) -> Self {
        self.last_message_time = Some(time.into());
        self
    }

    /// Set presence.
    #[must_use]
    pub fn with_presence(mut self, is_online: bool, last_seen: impl Into<String>) -> Self {
        self.is_online = is_online;
        self.last_seen = Some(last_seen.into());
        self
    }

    /// Set the seed history.
    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// First character of the name, for the avatar.
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }

    /// Header subtitle when the peer is not typing.
    pub fn presence_text(&self) -> &str {
        self.last_seen.as_deref().unwrap_or("last seen today")
    }

    /// Case-insensitive match of `needle_lower` against name or preview.
    ///
    /// `needle_lower` must already be lowercase.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.last_message.to_lowercase().contains(needle_lower)
    }
}
