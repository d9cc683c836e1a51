//! Entry point for one interactive filtering command.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::clipboard::ClipboardStore;
use crate::commit::CommitOutcome;
use crate::config::{resolve_executable, Config};
use crate::engine::is_valid;
use crate::error::{CoreError, CoreResult};
use crate::frontend::{Decision, Frontend};
use crate::highlight::Highlighter;
use crate::preview::PreviewController;
use crate::session::Session;

/// Where the document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Stdin,
    File(PathBuf),
}

impl DocumentSource {
    /// `-` or no argument means stdin.
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            Some(path) if path != Path::new("-") => DocumentSource::File(path.to_path_buf()),
            _ => DocumentSource::Stdin,
        }
    }

    pub fn label(&self) -> String {
        match self {
            DocumentSource::Stdin => "standard input".to_string(),
            DocumentSource::File(path) => path.display().to_string(),
        }
    }

    pub fn read(&self) -> CoreResult<String> {
        match self {
            DocumentSource::Stdin => {
                let mut content = String::new();
                std::io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
            DocumentSource::File(path) => std::fs::read_to_string(path).map_err(|error| {
                CoreError::Internal(format!("failed to read {}: {error}", path.display()))
            }),
        }
    }
}

/// Checks the preconditions in order and builds the session.
///
/// The executable must resolve before the document is validated, so a missing
/// engine is never reported as an invalid document.
pub async fn prepare_session(
    config: &Config,
    document: impl Into<Arc<str>>,
    source_label: &str,
) -> CoreResult<Arc<Session>> {
    let executable = resolve_executable(&config.executable)?;
    tracing::debug!("filter engine: {}", executable.display());

    let document: Arc<str> = document.into();
    if !is_valid(&executable, &document).await {
        return Err(CoreError::InvalidDocument(source_label.to_string()));
    }

    let session = Arc::new(Session::new(document, executable));
    tracing::info!(session = %session.id(), source = source_label, "session started");
    Ok(session)
}

/// Runs the front end until the user decides, then commits or discards.
pub async fn run_session<F>(
    frontend: &mut F,
    session: Arc<Session>,
    config: Arc<Config>,
    highlighter: Arc<dyn Highlighter>,
    store: &mut dyn ClipboardStore,
) -> CoreResult<CommitOutcome>
where
    F: Frontend + ?Sized,
{
    let (mut controller, mut updates) = PreviewController::new(session, config, highlighter);
    match frontend.drive(&mut controller, &mut updates).await? {
        Decision::Confirm => controller.confirm(store),
        Decision::Cancel => Ok(controller.cancel()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboardStore;
    use crate::frontend::{ScriptedFrontend, Step};
    use crate::highlight::JsonHighlighter;

    #[test]
    fn dash_and_missing_argument_mean_stdin() {
        assert_eq!(DocumentSource::from_arg(None), DocumentSource::Stdin);
        assert_eq!(
            DocumentSource::from_arg(Some(Path::new("-"))),
            DocumentSource::Stdin
        );
        assert_eq!(
            DocumentSource::from_arg(Some(Path::new("data.json"))),
            DocumentSource::File(PathBuf::from("data.json"))
        );
        assert_eq!(DocumentSource::Stdin.label(), "standard input");
    }

    #[test]
    fn reads_file_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "{\"a\":1}").expect("write");
        let content = DocumentSource::File(path).read().expect("read");
        assert_eq!(content, "{\"a\":1}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = DocumentSource::File(dir.path().join("nope.json"))
            .read()
            .expect_err("missing");
        assert!(matches!(err, CoreError::Internal(_)));
    }

    #[tokio::test]
    async fn missing_executable_is_checked_first() {
        let config = Config::default().with_executable("/nonexistent/jq-binary");
        let err = prepare_session(&config, "not json", "doc.json")
            .await
            .expect_err("missing engine");
        assert!(matches!(err, CoreError::ExecutableNotFound(_)));
    }

    #[cfg(unix)]
    mod with_engine {
        use super::*;
        use crate::testing::fake_engine;

        fn strict_engine(dir: &Path) -> PathBuf {
            // Accepts only documents starting with `{` or `[`.
            fake_engine(
                dir,
                "strict",
                "doc=$(cat)\ncase \"$doc\" in\n  \\{*|\\[*) printf '%s\\n' \"$doc\" ;;\n  *) exit 5 ;;\nesac",
            )
        }

        #[tokio::test]
        async fn invalid_document_is_rejected() {
            let dir = tempfile::tempdir().expect("tempdir");
            let config =
                Config::default().with_executable(strict_engine(dir.path()).display().to_string());

            let err = prepare_session(&config, "not json", "doc.json")
                .await
                .expect_err("invalid");
            assert!(matches!(err, CoreError::InvalidDocument(ref label) if label == "doc.json"));

            let err = prepare_session(&config, "", "standard input")
                .await
                .expect_err("empty");
            assert!(matches!(err, CoreError::InvalidDocument(_)));
        }

        #[tokio::test]
        async fn confirmed_session_commits_result() {
            let dir = tempfile::tempdir().expect("tempdir");
            let config =
                Config::default().with_executable(strict_engine(dir.path()).display().to_string());
            let session = prepare_session(&config, "{\"a\":1}", "doc.json")
                .await
                .expect("session");
            assert_eq!(session.document(), "{\"a\":1}");

            let mut store = MemoryClipboardStore::default();
            let mut frontend = ScriptedFrontend::single_query("a");
            let outcome = run_session(
                &mut frontend,
                session,
                Arc::new(config),
                Arc::new(JsonHighlighter),
                &mut store,
            )
            .await
            .expect("run");

            assert!(matches!(outcome, CommitOutcome::Committed(_)));
            assert_eq!(store.latest().expect("latest").content, "{\"a\":1}\n");
        }

        #[tokio::test]
        async fn cancelled_session_stores_nothing() {
            let dir = tempfile::tempdir().expect("tempdir");
            let config =
                Config::default().with_executable(strict_engine(dir.path()).display().to_string());
            let session = prepare_session(&config, "[1]", "doc.json")
                .await
                .expect("session");

            let mut store = MemoryClipboardStore::default();
            let mut frontend = ScriptedFrontend::new(vec![
                Step::Type("length".to_string()),
                Step::Settle,
                Step::Cancel,
            ]);
            let outcome = run_session(
                &mut frontend,
                session,
                Arc::new(config),
                Arc::new(JsonHighlighter),
                &mut store,
            )
            .await
            .expect("run");

            assert_eq!(outcome, CommitOutcome::Cancelled);
            assert!(store.is_empty());
        }
    }
}
