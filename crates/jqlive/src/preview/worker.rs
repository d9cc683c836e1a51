use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};

use crate::engine;
use crate::error::InvocationFailure;
use crate::generation::GenerationToken;

/// Completion of one engine run, tagged with the generation that asked for it.
#[derive(Debug, Clone)]
pub struct PreviewUpdate {
    pub generation: u64,
    pub label: String,
    pub outcome: Result<Arc<str>, InvocationFailure>,
}

pub(crate) struct Evaluation {
    pub token: GenerationToken,
    pub label: String,
    pub filter: String,
    pub executable: PathBuf,
    pub document: Arc<str>,
}

/// Runs one evaluation on its own task.
///
/// Waits for an in-flight permit first. A worker superseded while waiting
/// exits without spawning the engine; one superseded while running kills the
/// engine and releases its permit without reporting.
pub(crate) fn spawn_evaluation(
    evaluation: Evaluation,
    permits: Arc<Semaphore>,
    updates: mpsc::UnboundedSender<PreviewUpdate>,
) {
    tokio::spawn(async move {
        let generation = evaluation.token.generation();
        let _permit = tokio::select! {
            permit = permits.acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => return,
            },
            () = evaluation.token.superseded() => {
                tracing::trace!(generation, "skipping superseded evaluation");
                return;
            }
        };
        if evaluation.token.is_superseded() {
            tracing::trace!(generation, "skipping superseded evaluation");
            return;
        }

        let run = engine::run(&evaluation.executable, &evaluation.document, &evaluation.filter);
        let outcome = tokio::select! {
            outcome = run => outcome.map(Arc::from),
            () = evaluation.token.superseded() => {
                tracing::debug!(generation, "engine run superseded; killed");
                return;
            }
        };

        let _ = updates.send(PreviewUpdate {
            generation,
            label: evaluation.label,
            outcome,
        });
    });
}
