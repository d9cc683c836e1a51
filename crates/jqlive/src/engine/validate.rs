use std::path::Path;

use crate::engine::invoke::run;
use crate::shorthand::ROOT_SELECTOR;

/// Query that returns its input unchanged.
pub const IDENTITY_FILTER: &str = ROOT_SELECTOR;

/// Whether `content` is something the filter engine accepts as input.
///
/// The check runs on its own copy of the content and never touches session
/// state. Empty content is rejected without spawning anything.
pub async fn is_valid(executable: &Path, content: &str) -> bool {
    if content.is_empty() {
        return false;
    }
    let snapshot = content.to_owned();
    match run(executable, &snapshot, IDENTITY_FILTER).await {
        Ok(_) => true,
        Err(failure) => {
            tracing::debug!("document check failed: {failure}");
            false
        }
    }
}
