use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

/// A successful engine result and the input generation that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestResult {
    pub generation: u64,
    pub text: Arc<str>,
}

/// State of one interactive filtering command.
///
/// The document is a snapshot taken when the command started. The latest
/// result only ever moves forward in generation and is never cleared by a
/// failed run.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    document: Arc<str>,
    executable: PathBuf,
    latest: Mutex<Option<LatestResult>>,
}

impl Session {
    pub fn new(document: impl Into<Arc<str>>, executable: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            document: document.into(),
            executable: executable.into(),
            latest: Mutex::new(None),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    /// Cheap shared handle to the document for worker tasks.
    pub fn document_snapshot(&self) -> Arc<str> {
        Arc::clone(&self.document)
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn latest(&self) -> Option<LatestResult> {
        self.latest.lock().clone()
    }

    pub fn latest_text(&self) -> Option<Arc<str>> {
        self.latest.lock().as_ref().map(|latest| Arc::clone(&latest.text))
    }

    /// Stores `text` unless a result from the same or a newer generation is
    /// already there. Returns whether the write happened.
    pub fn record_result(&self, generation: u64, text: Arc<str>) -> bool {
        let mut latest = self.latest.lock();
        if let Some(current) = latest.as_ref() {
            if current.generation >= generation {
                tracing::debug!(
                    session = %self.id,
                    generation,
                    current = current.generation,
                    "rejected stale result"
                );
                return false;
            }
        }
        *latest = Some(LatestResult { generation, text });
        true
    }
}
