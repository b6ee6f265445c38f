//! Production Environment implementation using system clocks.
//!
//! Monotonic time comes from `std::time::Instant`, message timestamps from
//! the local wall clock. Both advance naturally, so behavior is
//! non-deterministic; simulation uses a virtual clock instead.

use chirp_core::{Environment, NaiveDateTime};

/// Production environment using system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn local_now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
