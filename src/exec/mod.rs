// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`limiter`] caps how many commands run at once (FIFO waiters).
//! - [`runner`] spawns one command with `tokio::process::Command`, drains its
//!   output under a byte ceiling and kills it on timeout.
//! - [`classify`] is the pure mapping from exit code + output to
//!   [`crate::types::ExecutionResult`], including the reboot heuristic.
//! - `tree` kills a child together with everything it started (process
//!   group on Unix, Job Object on Windows).
//! - [`gateway`] puts the limiter in front of the runner.
//! - [`backend`] provides the `CommandBackend` trait the tool layer depends
//!   on, so tests can swap in a fake.

pub mod backend;
pub mod classify;
pub mod gateway;
pub mod limiter;
pub mod runner;
mod tree;

pub use backend::CommandBackend;
pub use classify::classify;
pub use gateway::Gateway;
pub use limiter::{ConcurrencyLimiter, ConcurrencySlot};
pub use runner::ProcessRunner;
