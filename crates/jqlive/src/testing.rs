//! Scratch filter engines for tests.

use std::path::{Path, PathBuf};

use crate::config::resolve_executable;

/// Writes an executable `/bin/sh` script standing in for the filter engine.
/// The filter arrives as `$1` and the document on stdin.
#[cfg(unix)]
pub(crate) fn fake_engine(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write fake engine");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod fake engine");
    path
}

/// The real `jq`, when one is installed.
pub(crate) fn jq_on_path() -> Option<PathBuf> {
    resolve_executable("jq").ok()
}

/// Clipboard backend whose host is never reachable.
pub(crate) struct UnreachableClipboard;

impl crate::clipboard::ClipboardBackend for UnreachableClipboard {
    fn set_text(&mut self, _text: &str) -> crate::error::CoreResult<()> {
        Err(crate::error::CoreError::ClipboardUnavailable(
            "no display".to_string(),
        ))
    }
}
