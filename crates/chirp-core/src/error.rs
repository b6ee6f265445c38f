//! Error types for Chirp core.
//!
//! Seed data is validated once at load time so the rest of the system can
//! rely on unique contact ids and ordered message histories.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::model::{ContactId, MessageId};

/// Errors raised while loading or validating seed contact data.
#[derive(Error, Debug)]
pub enum SeedError {
    /// Seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        /// Path of the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Seed file is not valid contact JSON.
    #[error("invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two contacts share the same id.
    #[error("duplicate contact id {0}")]
    DuplicateContact(ContactId),

    /// A contact has an empty display name.
    #[error("contact {0} has an empty name")]
    EmptyName(ContactId),

    /// A contact's seed history is not strictly increasing by id.
    #[error("contact {contact}: message id {id} does not follow {previous}")]
    MessageOrder {
        /// Contact whose history is malformed.
        contact: ContactId,
        /// Id of the previous message.
        previous: MessageId,
        /// Offending message id.
        id: MessageId,
    },

    /// A seed history uses the largest message id, leaving none for new
    /// messages.
    #[error("contact {contact}: message id {id} leaves no room for new messages")]
    MessageIdExhausted {
        /// Contact whose history is malformed.
        contact: ContactId,
        /// Offending message id.
        id: MessageId,
    },
}

/// Invalid simulated-reply configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The reply must arrive after the typing indicator appears.
    #[error("reply delay {reply_ms}ms must be greater than typing delay {typing_ms}ms")]
    DelayOrder {
        /// Configured typing delay in milliseconds.
        typing_ms: u128,
        /// Configured reply delay in milliseconds.
        reply_ms: u128,
    },

    /// Canned reply text is blank.
    #[error("reply text must not be blank")]
    EmptyReply,
}
