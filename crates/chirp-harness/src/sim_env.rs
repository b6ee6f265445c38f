//! Virtual-clock environment.
//!
//! Time only moves when a test calls [`SimEnv::advance`]. Clones share the
//! same clock, so a driver and the App observe identical instants.

use std::{
    ops::Sub,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use chirp_core::{Environment, NaiveDateTime};
use chrono::{NaiveDate, TimeDelta};

/// Instant on the virtual clock: time elapsed since the simulation began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimInstant(Duration);

impl SimInstant {
    /// Time since the simulation began.
    pub fn elapsed(self) -> Duration {
        self.0
    }
}

impl Sub for SimInstant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.0.saturating_sub(rhs.0)
    }
}

/// Deterministic environment for simulation.
#[derive(Debug, Clone)]
pub struct SimEnv {
    nanos: Arc<AtomicU64>,
    wall_base: NaiveDateTime,
}

impl Default for SimEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl SimEnv {
    /// Clock at zero with the wall clock at 2024-03-01 09:41.
    pub fn new() -> Self {
        let wall_base = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 41, 0))
            .unwrap_or_default();
        Self::with_wall_clock(wall_base)
    }

    /// Clock at zero with the given wall-clock base.
    pub fn with_wall_clock(wall_base: NaiveDateTime) -> Self {
        Self { nanos: Arc::new(AtomicU64::new(0)), wall_base }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Move the clock forward by whole milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Time since the simulation began.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

impl Environment for SimEnv {
    type Instant = SimInstant;

    fn now(&self) -> SimInstant {
        SimInstant(self.elapsed())
    }

    fn local_now(&self) -> NaiveDateTime {
        TimeDelta::from_std(self.elapsed())
            .ok()
            .and_then(|delta| self.wall_base.checked_add_signed(delta))
            .unwrap_or(self.wall_base)
    }
}
