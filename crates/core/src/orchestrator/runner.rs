//! Batch orchestrator implementation.

use futures::stream::{self, StreamExt};
use std::path::Path;
use tracing::{info, warn};

use crate::discovery::discover;
use crate::engine::Launcher;
use crate::language::LanguageTag;
use crate::processor::{ConversionResult, ItemProcessor};
use crate::shutdown::Shutdown;

use super::config::BatchOptions;
use super::types::{BatchRun, OrchestratorError, RunMode, RunStatus};

/// Drives a batch run from candidate selection to the final summary.
pub struct Orchestrator<L: Launcher> {
    processor: ItemProcessor<L>,
    options: BatchOptions,
}

impl<L: Launcher> Orchestrator<L> {
    /// Creates a new orchestrator.
    pub fn new(processor: ItemProcessor<L>, options: BatchOptions) -> Self {
        Self { processor, options }
    }

    pub fn processor(&self) -> &ItemProcessor<L> {
        &self.processor
    }

    /// Runs the batch in `dir`, which holds both inputs and outputs.
    ///
    /// Item failures never stop the run; only an unreadable directory does.
    /// If `shutdown` fires, in-flight items are cancelled and no new ones start.
    pub async fn run(
        &self,
        mode: RunMode,
        language: &LanguageTag,
        dir: &Path,
        shutdown: &Shutdown,
    ) -> Result<BatchRun, OrchestratorError> {
        let candidates = match &mode {
            RunMode::Manual(base_name) => {
                info!("Processing {} in {}", base_name, dir.display());
                vec![base_name.clone()]
            }
            RunMode::Automatic => {
                let audio_ext = &self.processor.extensions().audio;
                let candidates = discover(dir, audio_ext).await?;

                if candidates.is_empty() {
                    info!("No .{} files found in {}", audio_ext, dir.display());
                } else {
                    info!(
                        "Found {} candidate(s) in {}",
                        candidates.len(),
                        dir.display()
                    );
                }

                candidates
            }
        };

        let results = self
            .process_all(&candidates, language, dir, shutdown)
            .await;

        // A signal that lands after the last item finished does not cancel the run
        let cancelled = results.len() < candidates.len()
            || results.iter().any(ConversionResult::is_cancelled);

        let run = BatchRun {
            mode,
            directory: dir.to_path_buf(),
            language: language.clone(),
            candidates,
            results,
            cancelled,
        };

        log_summary(&run);
        Ok(run)
    }

    /// Processes candidates with at most `jobs` in flight, keeping their order.
    async fn process_all(
        &self,
        candidates: &[String],
        language: &LanguageTag,
        dir: &Path,
        shutdown: &Shutdown,
    ) -> Vec<ConversionResult> {
        let jobs = self.options.jobs.max(1);
        let total = candidates.len();

        let results: Vec<Option<ConversionResult>> = stream::iter(0..total)
            .map(|index| {
                let base_name = &candidates[index];
                async move {
                    if shutdown.is_triggered() {
                        return None;
                    }

                    info!("[{}/{}] {}", index + 1, total, base_name);
                    Some(
                        self.processor
                            .process(base_name, language, dir, shutdown)
                            .await,
                    )
                }
            })
            .buffered(jobs)
            .collect()
            .await;

        results.into_iter().flatten().collect()
    }
}

fn log_summary(run: &BatchRun) {
    let summary = run.summary();

    match run.status() {
        RunStatus::NothingFound => {
            info!("Nothing to convert");
        }
        RunStatus::Cancelled => {
            warn!(
                "Cancelled: {} converted, {} skipped, {} failed, {} not started",
                summary.converted, summary.skipped, summary.failed, summary.not_started
            );
        }
        RunStatus::Completed | RunStatus::ItemsFailed(_) => {
            info!(
                "Summary: {} converted, {} skipped, {} failed",
                summary.converted, summary.skipped, summary.failed
            );
        }
    }

    info!("Done");
}
