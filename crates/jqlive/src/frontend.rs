//! The list UI seam.
//!
//! A front end feeds input changes to the [`PreviewController`], applies the
//! completions it receives, and reports what the user decided.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::preview::{PreviewController, PreviewState, PreviewUpdates};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirm,
    Cancel,
}

#[async_trait(?Send)]
pub trait Frontend {
    /// Runs until the user confirms or cancels.
    async fn drive(
        &mut self,
        controller: &mut PreviewController,
        updates: &mut PreviewUpdates,
    ) -> CoreResult<Decision>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Replaces the whole input with this text.
    Type(String),
    /// Waits until the run for the newest input has been applied.
    Settle,
    Confirm,
    Cancel,
}

/// Front end that replays a fixed list of steps. Backs `--query` and tests.
///
/// Running out of steps counts as cancelling.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrontend {
    steps: Vec<Step>,
}

impl ScriptedFrontend {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Evaluates one query and confirms its result.
    pub fn single_query(query: impl Into<String>) -> Self {
        Self::new(vec![Step::Type(query.into()), Step::Settle, Step::Confirm])
    }
}

#[async_trait(?Send)]
impl Frontend for ScriptedFrontend {
    async fn drive(
        &mut self,
        controller: &mut PreviewController,
        updates: &mut PreviewUpdates,
    ) -> CoreResult<Decision> {
        for step in std::mem::take(&mut self.steps) {
            match step {
                Step::Type(text) => {
                    controller.input_changed(&text);
                }
                Step::Settle => settle(controller, updates).await,
                Step::Confirm => return Ok(Decision::Confirm),
                Step::Cancel => return Ok(Decision::Cancel),
            }
        }
        Ok(Decision::Cancel)
    }
}

/// Applies completions until the newest run has landed.
pub async fn settle(controller: &mut PreviewController, updates: &mut PreviewUpdates) {
    while matches!(controller.state(), PreviewState::Evaluating { .. }) {
        match updates.recv().await {
            Some(update) => {
                controller.apply(update);
            }
            None => break,
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::sync::Arc;

    use tempfile::tempdir;

    use super::*;
    use crate::config::Config;
    use crate::highlight::PlainHighlighter;
    use crate::session::Session;
    use crate::testing::fake_engine;

    #[tokio::test]
    async fn script_types_settles_and_confirms() {
        let dir = tempdir().expect("tempdir");
        let engine = fake_engine(dir.path(), "one", "cat > /dev/null\necho 1");
        let session = Arc::new(Session::new("{}", &engine));
        let (mut controller, mut updates) = PreviewController::new(
            session,
            Arc::new(Config::default()),
            Arc::new(PlainHighlighter),
        );

        let mut frontend = ScriptedFrontend::single_query("length");
        let decision = frontend
            .drive(&mut controller, &mut updates)
            .await
            .expect("drive");

        assert_eq!(decision, Decision::Confirm);
        assert_eq!(controller.state(), PreviewState::Displaying);
        assert_eq!(controller.candidate().map(|c| c.payload()), Some("1\n"));
    }

    #[tokio::test]
    async fn exhausted_script_cancels() {
        let dir = tempdir().expect("tempdir");
        let engine = fake_engine(dir.path(), "one", "cat > /dev/null\necho 1");
        let session = Arc::new(Session::new("{}", &engine));
        let (mut controller, mut updates) = PreviewController::new(
            session,
            Arc::new(Config::default()),
            Arc::new(PlainHighlighter),
        );

        let mut frontend = ScriptedFrontend::new(vec![Step::Type(String::new())]);
        let decision = frontend
            .drive(&mut controller, &mut updates)
            .await
            .expect("drive");
        assert_eq!(decision, Decision::Cancel);
        assert_eq!(controller.state(), PreviewState::Idle);
    }
}
