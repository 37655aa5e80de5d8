//! Runs the engine for a single job.

use std::path::Path;
use tracing::debug;

use super::args::build_args;
use super::error::EngineError;
use super::traits::Launcher;
use super::types::{EngineJob, ResolvedEngine};
use crate::shutdown::Shutdown;

/// The external engine bound to a launcher.
pub struct Engine<L: Launcher> {
    engine: ResolvedEngine,
    extra_args: Vec<String>,
    launcher: L,
}

impl<L: Launcher> Engine<L> {
    /// Creates a new engine from a resolved binary.
    pub fn new(engine: ResolvedEngine, launcher: L) -> Self {
        Self {
            engine,
            extra_args: Vec::new(),
            launcher,
        }
    }

    /// Sets extra arguments passed before the output path.
    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    /// Path of the engine binary.
    pub fn program(&self) -> &Path {
        self.engine.path()
    }

    /// Converts one job, overwriting its output if it exists.
    ///
    /// Waits for the engine to exit. Nothing is retried.
    pub async fn invoke(&self, job: &EngineJob, shutdown: &Shutdown) -> Result<(), EngineError> {
        let args = build_args(job, &self.extra_args);
        debug!(
            "Invoking {} for {}",
            self.program().display(),
            job.output.display()
        );

        let exit = self
            .launcher
            .launch(self.program(), &args, shutdown)
            .await?;

        if exit.success() {
            return Ok(());
        }

        let stderr = exit.stderr();

        match exit.code {
            Some(code) => Err(EngineError::NonZeroExit { code, stderr }),
            None => Err(EngineError::Terminated { stderr }),
        }
    }
}
