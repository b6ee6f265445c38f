//! Core domain for Chirp.
//!
//! Contacts, messages and the conversation session with its simulated
//! reply timers. Nothing here performs I/O except loading a seed file;
//! time is supplied by the caller through [`Environment`], so every state
//! transition is deterministic under a virtual clock.
//!
//! # Components
//!
//! - [`Directory`]: validated seed contacts and case-insensitive filtering
//! - [`Conversation`]: message history, id counter and pending replies
//! - [`ReplySchedule`]: cancellable typing/reply timers
//! - [`Environment`]: monotonic and wall-clock time source

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod conversation;
pub mod directory;
pub mod env;
pub mod error;
pub mod model;
pub mod reply;
pub mod timefmt;

pub use chrono::NaiveDateTime;
pub use conversation::{Conversation, ConversationChange};
pub use directory::{ContactFilter, Directory};
pub use env::{Environment, Instant};
pub use error::{ConfigError, SeedError};
pub use model::{Contact, ContactId, DeliveryStatus, Message, MessageId};
pub use reply::{ReplyConfig, ReplyPhase, ReplySchedule, ReplyTicket, ReplyTransition};
