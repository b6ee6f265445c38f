//! Application layer for Chirp
//!
//! Pure state machines and a generic runtime for the directory and
//! conversation views, enabling deterministic simulation testing with the
//! same code that runs in the terminal.
//!
//! # Components
//!
//! - [`App`]: coordinator state machine (active contact, focus, routing)
//! - [`DirectoryView`]: search query, All/Online filter, highlight
//! - [`ConversationView`]: composer, message list, simulated replies
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod conversation;
mod directory;
mod driver;
mod event;
mod input;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use conversation::{ConversationOutcome, ConversationView};
pub use directory::{DirectoryOutcome, DirectoryView};
pub use driver::Driver;
pub use event::AppEvent;
pub use input::{KeyInput, TextInput};
pub use runtime::Runtime;
pub use state::{Focus, Selection};
