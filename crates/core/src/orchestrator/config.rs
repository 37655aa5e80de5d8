//! Orchestrator configuration.

use crate::config::BatchConfig;

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum number of items converted at the same time.
    /// `1` processes items strictly one after another.
    pub jobs: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self { jobs: 1 }
    }
}

impl BatchOptions {
    /// Sets the number of concurrent items, at least one.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }
}

impl From<&BatchConfig> for BatchOptions {
    fn from(config: &BatchConfig) -> Self {
        Self::default().with_jobs(config.jobs)
    }
}
