//! Batch orchestrator.
//!
//! Selects candidates (one explicit base name, or every audio file in the
//! working directory), processes each of them and reports a summary:
//! - **Manual**: exactly one item
//! - **Automatic**: directory scan, no candidates is a clean result
//! - **Concurrency**: sequential by default, bounded by `BatchOptions::jobs`

mod config;
mod runner;
mod types;

pub use config::BatchOptions;
pub use runner::Orchestrator;
pub use types::{
    BatchReport, BatchRun, BatchSummary, ItemReport, OrchestratorError, RunMode, RunStatus,
};
