use super::{ClipboardEntry, ClipboardStore, MemoryClipboardStore};
use crate::config::ClipboardPreferences;
use crate::error::{CoreError, CoreResult};

/// Places text on the host clipboard.
pub trait ClipboardBackend {
    fn set_text(&mut self, text: &str) -> CoreResult<()>;
}

/// Host clipboard through `arboard`, opened on first use.
#[derive(Default)]
pub struct ArboardBackend {
    inner: Option<arboard::Clipboard>,
}

impl ArboardBackend {
    pub fn new() -> Self {
        Self { inner: None }
    }

    fn ensure(&mut self) -> CoreResult<&mut arboard::Clipboard> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(unavailable)?,
        };
        Ok(self.inner.insert(clipboard))
    }
}

impl ClipboardBackend for ArboardBackend {
    fn set_text(&mut self, text: &str) -> CoreResult<()> {
        let clipboard = self.ensure()?;
        clipboard.set_text(text.to_string()).map_err(unavailable)
    }
}

fn unavailable(error: arboard::Error) -> CoreError {
    CoreError::ClipboardUnavailable(error.to_string())
}

/// Host clipboard plus a local record of what was copied this run.
///
/// An entry is recorded only after the host accepted it.
pub struct SystemClipboard<B = ArboardBackend> {
    backend: B,
    history: MemoryClipboardStore,
}

impl SystemClipboard {
    pub fn from_preferences(preferences: &ClipboardPreferences) -> Self {
        Self::with_backend(ArboardBackend::new(), preferences.history_limit)
    }
}

impl<B: ClipboardBackend> SystemClipboard<B> {
    pub fn with_backend(backend: B, history_limit: usize) -> Self {
        Self {
            backend,
            history: MemoryClipboardStore::with_limit(history_limit),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ClipboardBackend> ClipboardStore for SystemClipboard<B> {
    fn push(&mut self, entry: ClipboardEntry) -> CoreResult<()> {
        self.backend.set_text(&entry.content)?;
        tracing::debug!(session = %entry.session, "copied {} bytes", entry.content.len());
        self.history.push(entry)
    }

    fn latest(&self) -> Option<ClipboardEntry> {
        self.history.latest()
    }

    fn len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::testing::UnreachableClipboard;

    #[derive(Default)]
    struct RecordingBackend {
        copied: Vec<String>,
    }

    impl ClipboardBackend for RecordingBackend {
        fn set_text(&mut self, text: &str) -> CoreResult<()> {
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn copies_to_host_then_records() {
        let mut clip = SystemClipboard::with_backend(RecordingBackend::default(), 10);
        clip.push(ClipboardEntry::new(Uuid::new_v4(), "[\"a\",\"b\"]\n"))
            .expect("push");

        assert_eq!(clip.backend().copied, vec!["[\"a\",\"b\"]\n".to_string()]);
        assert_eq!(clip.latest().expect("latest").content, "[\"a\",\"b\"]\n");
    }

    #[test]
    fn unreachable_host_is_unavailable_and_not_recorded() {
        let mut clip = SystemClipboard::with_backend(UnreachableClipboard, 10);
        let err = clip
            .push(ClipboardEntry::new(Uuid::new_v4(), "x"))
            .expect_err("unavailable");

        assert!(matches!(err, CoreError::ClipboardUnavailable(_)));
        assert!(clip.is_empty());
    }
}
