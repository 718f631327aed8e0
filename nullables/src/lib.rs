//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the engine (clock, user record store,
//! question bank) is abstracted behind a trait. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically, including injected faults
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod questions;
pub mod store;

pub use clock::NullClock;
pub use questions::NullQuestionBank;
pub use store::{NullUserStore, WriteFault};
