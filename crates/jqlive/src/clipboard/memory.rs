use super::{ClipboardEntry, ClipboardStore};
use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::error::CoreResult;

/// In-process store of committed results, bounded to the newest entries.
///
/// Committing the same result again from the same session adds nothing.
#[derive(Debug)]
pub struct MemoryClipboardStore {
    entries: Vec<ClipboardEntry>,
    max_entries: usize,
}

impl Default for MemoryClipboardStore {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl MemoryClipboardStore {
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }
}

impl ClipboardStore for MemoryClipboardStore {
    fn push(&mut self, entry: ClipboardEntry) -> CoreResult<()> {
        let repeated = self
            .entries
            .last()
            .is_some_and(|last| last.session == entry.session && last.content == entry.content);
        if repeated {
            return Ok(());
        }
        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
        Ok(())
    }

    fn latest(&self) -> Option<ClipboardEntry> {
        self.entries.last().cloned()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
