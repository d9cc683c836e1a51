//! Shared clipboard-like store that committed results land in.

mod memory;
mod system;

use std::time::SystemTime;

use uuid::Uuid;

use crate::error::CoreResult;

pub use memory::MemoryClipboardStore;
pub use system::{ArboardBackend, ClipboardBackend, SystemClipboard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    pub id: Uuid,
    /// Session whose result this is.
    pub session: Uuid,
    pub content: String,
    pub copied_at: SystemTime,
}

impl ClipboardEntry {
    pub fn new(session: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session,
            content: content.into(),
            copied_at: SystemTime::now(),
        }
    }
}

/// Store whose last pushed entry is the most recent one.
pub trait ClipboardStore {
    /// Makes `entry` the most recent entry. Fails when the backing store is
    /// not reachable.
    fn push(&mut self, entry: ClipboardEntry) -> CoreResult<()>;
    fn latest(&self) -> Option<ClipboardEntry>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
