//! Terminal UI for Chirp
//!
//! A thin shell over [`chirp_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`chirp_app::Runtime`].
//!
//! This crate only handles terminal rendering, input mapping and file
//! logging.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod logging;
pub mod system_env;
pub mod terminal;
pub mod ui;

pub use chirp_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use system_env::SystemEnv;
pub use terminal::{TerminalDriver, TerminalError};
