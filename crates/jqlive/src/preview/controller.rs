use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};

use super::candidate::Candidate;
use super::worker::{spawn_evaluation, Evaluation, PreviewUpdate};
use crate::clipboard::ClipboardStore;
use crate::commit::{commit, no_result_notice, CommitOutcome};
use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::generation::GenerationTracker;
use crate::highlight::{Highlighted, Highlighter};
use crate::session::Session;
use crate::shorthand::expand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    /// No input to evaluate.
    Idle,
    /// An engine run for `generation` has been started.
    Evaluating { generation: u64 },
    /// The newest run finished; the shown candidate may predate it if it failed.
    Displaying,
    Committed,
    Cancelled,
}

impl PreviewState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PreviewState::Committed | PreviewState::Cancelled)
    }
}

/// What [`PreviewController::apply`] did with an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The result became the shown candidate.
    Displayed,
    /// The run failed; the previous candidate stays.
    KeptPrevious,
    /// The update belonged to superseded input, or the session is over.
    Discarded,
}

/// Receiving end for worker completions, drained by the UI loop.
#[derive(Debug)]
pub struct PreviewUpdates {
    rx: mpsc::UnboundedReceiver<PreviewUpdate>,
}

impl PreviewUpdates {
    pub async fn recv(&mut self) -> Option<PreviewUpdate> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<PreviewUpdate> {
        self.rx.try_recv().ok()
    }
}

/// Drives one interactive session.
///
/// Every input change takes a new generation and starts an engine run on a
/// worker task. Completions come back through [`PreviewUpdates`] and only the
/// one for the newest generation is applied.
pub struct PreviewController {
    session: Arc<Session>,
    config: Arc<Config>,
    highlighter: Arc<dyn Highlighter>,
    generations: GenerationTracker,
    permits: Arc<Semaphore>,
    updates_tx: mpsc::UnboundedSender<PreviewUpdate>,
    state: PreviewState,
    candidate: Option<Candidate>,
}

impl PreviewController {
    pub fn new(
        session: Arc<Session>,
        config: Arc<Config>,
        highlighter: Arc<dyn Highlighter>,
    ) -> (Self, PreviewUpdates) {
        let (updates_tx, rx) = mpsc::unbounded_channel();
        let permits = Arc::new(Semaphore::new(config.max_inflight.max(1)));
        let controller = Self {
            session,
            config,
            highlighter,
            generations: GenerationTracker::new(),
            permits,
            updates_tx,
            state: PreviewState::Idle,
            candidate: None,
        };
        (controller, PreviewUpdates { rx })
    }

    pub fn state(&self) -> PreviewState {
        self.state
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        self.candidate.as_ref()
    }

    /// Zero or one candidates, for list UIs that want a collection.
    pub fn candidates(&self) -> &[Candidate] {
        self.candidate.as_slice()
    }

    /// Handles an input change. Must be called from within a tokio runtime.
    ///
    /// Returns the generation of the started run, or `None` when nothing was
    /// started because the input is blank or the session is over.
    pub fn input_changed(&mut self, query: &str) -> Option<u64> {
        if self.state.is_terminal() {
            return None;
        }

        let generation = self.generations.next_generation();
        if query.trim().is_empty() {
            self.candidate = None;
            self.state = PreviewState::Idle;
            return None;
        }

        let filter = expand(query, &self.config.shorthands);
        tracing::debug!(
            session = %self.session.id(),
            generation,
            filter = %filter,
            "evaluating"
        );
        spawn_evaluation(
            Evaluation {
                token: self.generations.token(generation),
                label: query.to_string(),
                filter,
                executable: self.session.executable().to_path_buf(),
                document: self.session.document_snapshot(),
            },
            Arc::clone(&self.permits),
            self.updates_tx.clone(),
        );
        self.state = PreviewState::Evaluating { generation };
        Some(generation)
    }

    /// Applies a worker completion if it belongs to the newest input.
    pub fn apply(&mut self, update: PreviewUpdate) -> ApplyOutcome {
        if self.state.is_terminal() || !self.generations.is_current(update.generation) {
            tracing::trace!(generation = update.generation, "discarding stale update");
            return ApplyOutcome::Discarded;
        }

        self.state = PreviewState::Displaying;
        match update.outcome {
            Ok(text) => {
                self.session
                    .record_result(update.generation, Arc::clone(&text));
                self.candidate = Some(Candidate::new(update.label, text, update.generation));
                ApplyOutcome::Displayed
            }
            Err(failure) => {
                tracing::debug!(
                    generation = update.generation,
                    "keeping previous preview: {failure}"
                );
                ApplyOutcome::KeptPrevious
            }
        }
    }

    /// Renders a candidate's payload for display below the input line.
    pub fn annotate(&self, candidate: &Candidate) -> Highlighted {
        self.highlighter.highlight(candidate.payload()).detached()
    }

    /// Ends the session by committing the last successful result.
    ///
    /// Confirming before any run succeeded stores nothing and reports
    /// [`CommitOutcome::NoResult`]. Either way the session moves to
    /// [`PreviewState::Committed`] and in-flight runs are dropped.
    pub fn confirm(&mut self, store: &mut dyn ClipboardStore) -> CoreResult<CommitOutcome> {
        if self.state.is_terminal() {
            return Err(CoreError::Internal("session already ended".to_string()));
        }
        self.generations.next_generation();
        self.state = PreviewState::Committed;

        match self.session.latest_text() {
            Some(result) => {
                commit(store, self.session.id(), &result).map(CommitOutcome::Committed)
            }
            None => {
                let notice = no_result_notice();
                tracing::info!("{notice}");
                Ok(CommitOutcome::NoResult(notice))
            }
        }
    }

    /// Ends the session without committing anything.
    pub fn cancel(&mut self) -> CommitOutcome {
        if !self.state.is_terminal() {
            self.generations.next_generation();
            self.candidate = None;
            self.state = PreviewState::Cancelled;
            tracing::debug!(session = %self.session.id(), "cancelled");
        }
        CommitOutcome::Cancelled
    }
}
