//! Chirp terminal chat binary.
//!
//! # Usage
//!
//! ```bash
//! # Built-in contacts, default reply timings
//! chirp
//!
//! # Custom seed, slower replies, debug log
//! chirp --contacts contacts.json --reply-delay-ms 4000 --log-file chirp.log --log-level debug
//! ```

use std::{path::PathBuf, time::Duration};

use chirp_core::{
    Directory, ReplyConfig,
    reply::{DEFAULT_REPLY_DELAY, DEFAULT_REPLY_TEXT, DEFAULT_TYPING_DELAY},
};
use chirp_tui::{App, Runtime, SystemEnv, TerminalDriver, TerminalError, logging};
use clap::Parser;

/// Chirp terminal chat
#[derive(Parser, Debug)]
#[command(name = "chirp")]
#[command(about = "Terminal chat with a searchable contact list and simulated replies")]
#[command(version)]
struct Args {
    /// JSON file with the contact directory
    ///
    /// If not provided, a built-in set of contacts is used.
    #[arg(short, long)]
    contacts: Option<PathBuf>,

    /// Milliseconds after a send before the contact starts typing
    #[arg(long, default_value_t = millis(DEFAULT_TYPING_DELAY))]
    typing_delay_ms: u64,

    /// Milliseconds after a send before the reply arrives
    #[arg(long, default_value_t = millis(DEFAULT_REPLY_DELAY))]
    reply_delay_ms: u64,

    /// Text of the simulated reply
    #[arg(long, default_value = DEFAULT_REPLY_TEXT)]
    reply_text: String,

    /// Append logs to this file (stdout belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[allow(clippy::cast_possible_truncation)]
const fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        logging::init(path, &args.log_level).map_err(TerminalError::from)?;
    }

    let directory = match &args.contacts {
        Some(path) => Directory::load(path)?,
        None => Directory::builtin(),
    };
    let reply_config = ReplyConfig::new(
        Duration::from_millis(args.typing_delay_ms),
        Duration::from_millis(args.reply_delay_ms),
        args.reply_text,
    )?;

    tracing::info!(contacts = directory.len(), "chirp starting");

    let app = App::new(SystemEnv::new(), directory, reply_config);
    let driver = TerminalDriver::new()?;

    Ok(Runtime::new(driver, app).run().await?)
}
