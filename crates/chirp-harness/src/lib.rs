//! Deterministic simulation harness for Chirp.
//!
//! Virtual-clock implementations of the Environment and Driver traits for
//! deterministic, reproducible testing of reply timing, contact switching
//! and filtering.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the App
//! invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_driver;
pub mod sim_env;

pub use invariants::{
    ActiveContactExists, AppSnapshot, ConversationSnapshot, Invariant, InvariantRegistry,
    InvariantResult, MessageIdsIncreasing, TypingOnlyWhilePending, VisibleSubsetOfDirectory,
    Violation,
};
pub use sim_driver::{SimDriver, SimStep};
pub use sim_env::{SimEnv, SimInstant};
