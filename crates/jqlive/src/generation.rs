//! Generation counter for input events.
//!
//! Every input change takes a new generation. Work started for an older
//! generation is superseded and should stop; a late result is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Tracks the newest issued generation. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct GenerationTracker {
    active: Arc<AtomicU64>,
    advanced: Arc<Notify>,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next generation, superseding every earlier one.
    pub fn next_generation(&self) -> u64 {
        let generation = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.advanced.notify_waiters();
        generation
    }

    /// Newest issued generation, `0` before the first input.
    pub fn current(&self) -> u64 {
        self.active.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.current()
    }

    /// Token a worker can poll to learn whether it has been superseded.
    pub fn token(&self, generation: u64) -> GenerationToken {
        GenerationToken {
            active: Arc::clone(&self.active),
            advanced: Arc::clone(&self.advanced),
            generation,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationToken {
    active: Arc<AtomicU64>,
    advanced: Arc<Notify>,
    generation: u64,
}

impl GenerationToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn is_superseded(&self) -> bool {
        self.active.load(Ordering::SeqCst) != self.generation
    }

    /// Resolves once a newer generation has been issued.
    pub async fn superseded(&self) {
        loop {
            // Register before checking so a bump in between is not missed.
            let advanced = self.advanced.notified();
            if self.is_superseded() {
                return;
            }
            advanced.await;
        }
    }
}
