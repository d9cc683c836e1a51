use std::fmt;

use uuid::Uuid;

use crate::clipboard::{ClipboardEntry, ClipboardStore};
use crate::error::CoreResult;

/// Human-readable message shown once the session is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// How an interactive session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed(Notice),
    /// Confirmed before any run succeeded. Nothing was stored.
    NoResult(Notice),
    Cancelled,
}

impl CommitOutcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            CommitOutcome::Committed(notice) | CommitOutcome::NoResult(notice) => Some(notice),
            CommitOutcome::Cancelled => None,
        }
    }
}

/// Pushes `result` from `session` into the shared store as its newest entry.
pub fn commit(store: &mut dyn ClipboardStore, session: Uuid, result: &str) -> CoreResult<Notice> {
    store.push(ClipboardEntry::new(session, result))?;
    let lines = result.lines().count();
    let notice = Notice::new(format!(
        "Copied filtered JSON to clipboard ({lines} {}, {} bytes)",
        if lines == 1 { "line" } else { "lines" },
        result.len()
    ));
    tracing::info!(%session, "{notice}");
    Ok(notice)
}

pub fn no_result_notice() -> Notice {
    Notice::new("No filter result to copy")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{MemoryClipboardStore, SystemClipboard};
    use crate::error::CoreError;
    use crate::testing::UnreachableClipboard;

    #[test]
    fn commit_stores_result_verbatim() {
        let session = Uuid::new_v4();
        let mut store = MemoryClipboardStore::default();
        let notice = commit(&mut store, session, "[\"a\",\"b\"]\n").expect("commit");

        let entry = store.latest().expect("latest");
        assert_eq!(entry.content, "[\"a\",\"b\"]\n");
        assert_eq!(entry.session, session);
        assert_eq!(
            notice.message,
            "Copied filtered JSON to clipboard (1 line, 10 bytes)"
        );
    }

    #[test]
    fn commit_becomes_most_recent_entry() {
        let session = Uuid::new_v4();
        let mut store = MemoryClipboardStore::default();
        commit(&mut store, session, "older").expect("commit");
        let notice = commit(&mut store, session, "{\n  \"a\": 1\n}\n").expect("commit");

        assert_eq!(store.latest().expect("latest").content, "{\n  \"a\": 1\n}\n");
        assert_eq!(store.len(), 2);
        assert!(notice.message.contains("3 lines"));
    }

    #[test]
    fn unavailable_store_propagates() {
        let mut store = SystemClipboard::with_backend(UnreachableClipboard, 10);
        let err = commit(&mut store, Uuid::new_v4(), "1\n").expect_err("unavailable");
        assert!(matches!(err, CoreError::ClipboardUnavailable(_)));
    }

    #[test]
    fn outcome_exposes_notice() {
        assert!(CommitOutcome::Cancelled.notice().is_none());
        let outcome = CommitOutcome::NoResult(no_result_notice());
        assert_eq!(
            outcome.notice().map(|n| n.message.as_str()),
            Some("No filter result to copy")
        );
    }
}
