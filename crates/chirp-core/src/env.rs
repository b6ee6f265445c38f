//! Environment abstraction for deterministic testing.
//!
//! Decouples conversation logic from system clocks. Reply timers are
//! measured against [`Environment::now`], display timestamps are taken from
//! [`Environment::local_now`]. Production uses the real clocks; simulation
//! uses a virtual clock the test advances explicitly.

use std::time::Duration;

use chrono::NaiveDateTime;

/// Monotonic time point used for reply deadlines.
///
/// Production environments use `std::time::Instant`, simulation
/// environments use a virtual instant.
pub trait Instant: Copy + Ord + Send + Sync + std::ops::Sub<Output = Duration> {}

impl<T> Instant for T where T: Copy + Ord + Send + Sync + std::ops::Sub<Output = Duration> {}

/// Abstract environment providing monotonic and wall-clock time.
///
/// # Invariants
///
/// Implementations MUST guarantee that `now()` never goes backwards within a
/// single execution context. `local_now()` carries no such guarantee; it is
/// only used for display.
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    type Instant: Instant;

    /// Current monotonic time.
    fn now(&self) -> Self::Instant;

    /// Current local wall-clock time, used to stamp new messages.
    fn local_now(&self) -> NaiveDateTime;
}
