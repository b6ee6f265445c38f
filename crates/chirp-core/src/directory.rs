//! Static contact directory.
//!
//! The directory is seed data: loaded once, validated, never mutated. The
//! directory view filters it on every render.

use std::{collections::HashSet, path::Path};

use crate::{
    error::SeedError,
    model::{Contact, ContactId, DeliveryStatus, Message, MessageId},
};

/// Which contacts a directory listing includes before the text query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactFilter {
    /// Every contact.
    #[default]
    All,
    /// Only contacts currently online.
    Online,
}

impl ContactFilter {
    /// The other filter.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::All => Self::Online,
            Self::Online => Self::All,
        }
    }

    fn admits(self, contact: &Contact) -> bool {
        match self {
            Self::All => true,
            Self::Online => contact.is_online,
        }
    }
}

/// Validated, ordered list of seed contacts.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    contacts: Vec<Contact>,
}

impl Directory {
    /// Validate and wrap a list of contacts. Order is preserved.
    ///
    /// Contact ids must be unique, names non-empty, and each seed history
    /// strictly increasing by message id, stopping short of `u64::MAX`.
    pub fn from_contacts(contacts: Vec<Contact>) -> Result<Self, SeedError> {
        let mut seen = HashSet::with_capacity(contacts.len());
        for contact in &contacts {
            if !seen.insert(contact.id) {
                return Err(SeedError::DuplicateContact(contact.id));
            }
            if contact.name.trim().is_empty() {
                return Err(SeedError::EmptyName(contact.id));
            }
            for pair in contact.messages.windows(2) {
                if let [previous, current] = pair
                    && current.id <= previous.id
                {
                    return Err(SeedError::MessageOrder {
                        contact: contact.id,
                        previous: previous.id,
                        id: current.id,
                    });
                }
            }
            if let Some(last) = contact.messages.last()
                && last.id.next().is_none()
            {
                return Err(SeedError::MessageIdExhausted { contact: contact.id, id: last.id });
            }
        }

        Ok(Self { contacts })
    }

    /// Parse a JSON array of contacts.
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let contacts: Vec<Contact> = serde_json::from_str(json)?;
        Self::from_contacts(contacts)
    }

    /// Load a JSON seed file.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| SeedError::Io { path: path.to_path_buf(), source })?;
        let directory = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), contacts = directory.len(), "loaded seed contacts");
        Ok(directory)
    }

    /// Built-in demo contacts.
    pub fn builtin() -> Self {
        Self { contacts: builtin_contacts() }
    }

    /// All contacts in seed order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Look up a contact by id.
    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Check if the directory has no contacts.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Contacts admitted by `filter` whose name or last message contains
    /// `query`, ignoring case. Seed order is preserved.
    pub fn filter(&self, query: &str, filter: ContactFilter) -> Vec<&Contact> {
        let needle = query.to_lowercase();
        self.contacts.iter().filter(|c| filter.admits(c) && c.matches(&needle)).collect()
    }
}

fn seed_message(id: u64, text: &str, time: &str, outgoing: bool, status: DeliveryStatus) -> Message {
    Message {
        id: MessageId(id),
        text: text.to_string(),
        time: time.to_string(),
        outgoing,
        status,
        date: crate::model::TODAY.to_string(),
    }
}

fn builtin_contacts() -> Vec<Contact> {
    use DeliveryStatus::{Delivered, Read};

    vec![
        Contact::new(1, "Ana Souza")
            .with_presence(true, "online")
            .with_last_message("See you at the standup!")
            .with_last_message_time("10:30 AM")
            .with_messages(vec![
                seed_message(1, "Morning! Are we still on for today?", "10:12 AM", false, Read),
                seed_message(2, "Yes, 10:45 in the small room.", "10:20 AM", true, Read),
                seed_message(3, "See you at the standup!", "10:30 AM", false, Read),
            ]),
        Contact::new(2, "Netstat Bob")
            .with_presence(false, "last seen 2 hours ago")
            .with_last_message("Port 8080 is still taken")
            .with_last_message_time("Yesterday")
            .with_messages(vec![
                seed_message(1, "Can you free up 8080?", "09:02 PM", true, Delivered),
                seed_message(2, "Port 8080 is still taken", "09:15 PM", false, Read),
            ]),
        Contact::new(3, "Chen Wei")
            .with_presence(true, "online")
            .with_last_message("Pushed the fix, take a look")
            .with_last_message_time("09:05 AM")
            .with_messages(vec![seed_message(
                1,
                "Pushed the fix, take a look",
                "09:05 AM",
                false,
                Read,
            )]),
        Contact::new(4, "Dana Kowalski")
            .with_presence(false, "last seen yesterday")
            .with_last_message("Thanks for the review")
            .with_last_message_time("01-12-2022"),
        Contact::new(5, "Emeka Obi")
            .with_presence(false, "last seen recently")
            .with_last_message("Lunch on Friday?")
            .with_last_message_time("Yesterday")
            .with_messages(vec![
                seed_message(1, "Lunch on Friday?", "01:10 PM", false, Read),
                seed_message(2, "Sounds good", "01:12 PM", true, Read),
            ]),
        Contact::new(6, "Freya Lind")
            .with_presence(true, "online")
            .with_last_message("The build is green again")
            .with_last_message_time("08:47 AM"),
    ]
}
