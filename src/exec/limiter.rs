// src/exec/limiter.rs

//! Admission control for external process execution.
//!
//! Backed by `tokio::sync::Semaphore`, which is fair: waiters are served in
//! the order they started waiting. A [`ConcurrencySlot`] gives its permit back
//! when dropped, so every exit path of an execution (success, failure,
//! timeout, overflow, or the caller dropping the future) releases exactly once.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::trace;


/// Process-wide cap on concurrently running commands.
///
/// Cloning is cheap and clones share the same permits.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// Held while a command runs. Dropping it releases the slot.
#[derive(Debug)]
#[must_use = "the slot is released as soon as it is dropped"]
pub struct ConcurrencySlot {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyLimiter {
    /// Capacity is clamped to `1..=Semaphore::MAX_PERMITS`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Wait (without timeout) for a free slot.
    ///
    /// The semaphore is private and never closed, so acquisition cannot fail.
    pub async fn acquire(&self) -> ConcurrencySlot {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .expect("limiter semaphore is never closed");
        trace!(available = self.available(), "concurrency slot acquired");
        ConcurrencySlot { _permit: permit }
    }

    /// Take a slot only if one is free right now.
    pub fn try_acquire(&self) -> Option<ConcurrencySlot> {
        Arc::clone(&self.semaphore)
            .try_acquire_owned()
            .ok()
            .map(|permit| ConcurrencySlot { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots free at this instant.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl ConcurrencySlot {
    /// Explicit release; same as dropping.
    pub fn release(self) {}
}
