//! Types for the orchestrator.

use serde::Serialize;
use std::path::PathBuf;

use crate::discovery::DiscoveryError;
use crate::language::LanguageTag;
use crate::processor::{ConversionResult, Outcome};

/// Errors that abort a whole run.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// The working directory could not be scanned.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

/// How candidates are selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Process exactly one base name.
    Manual(String),
    /// Scan the working directory for audio files.
    Automatic,
}

impl RunMode {
    /// Manual mode if a base name is given, automatic otherwise.
    pub fn from_base_name(base_name: Option<String>) -> Self {
        match base_name {
            Some(base_name) => Self::Manual(base_name),
            None => Self::Automatic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Manual(_) => "manual",
            Self::Automatic => "automatic",
        }
    }
}

/// Overall status of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every candidate was converted or skipped.
    Completed,
    /// Automatic mode found no candidates.
    NothingFound,
    /// This many items failed.
    ItemsFailed(usize),
    /// The run was cancelled before it finished.
    Cancelled,
}

/// Counts of item outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub candidates: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Candidates never processed because the run was cancelled.
    pub not_started: usize,
}

/// One invocation of the tool: the candidates and their results, in order.
#[derive(Debug)]
pub struct BatchRun {
    pub mode: RunMode,
    pub directory: PathBuf,
    pub language: LanguageTag,
    pub candidates: Vec<String>,
    pub results: Vec<ConversionResult>,
    pub cancelled: bool,
}

impl BatchRun {
    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            candidates: self.candidates.len(),
            not_started: self.candidates.len().saturating_sub(self.results.len()),
            ..Default::default()
        };

        for result in &self.results {
            match result.outcome() {
                Outcome::Converted => summary.converted += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }

        summary
    }

    pub fn status(&self) -> RunStatus {
        if self.cancelled {
            return RunStatus::Cancelled;
        }

        if self.mode == RunMode::Automatic && self.candidates.is_empty() {
            return RunStatus::NothingFound;
        }

        match self.summary().failed {
            0 => RunStatus::Completed,
            n => RunStatus::ItemsFailed(n),
        }
    }

    /// Serializable view of the run.
    pub fn report(&self) -> BatchReport {
        BatchReport {
            mode: self.mode.name(),
            directory: self.directory.clone(),
            language: self.language.clone(),
            cancelled: self.cancelled,
            summary: self.summary(),
            items: self.results.iter().map(ItemReport::from).collect(),
        }
    }
}

/// Serializable report of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub mode: &'static str,
    pub directory: PathBuf,
    pub language: LanguageTag,
    pub cancelled: bool,
    pub summary: BatchSummary,
    pub items: Vec<ItemReport>,
}

/// Serializable report of one item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub base_name: String,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&ConversionResult> for ItemReport {
    fn from(result: &ConversionResult) -> Self {
        let (output, duration_ms) = match result {
            ConversionResult::Converted {
                output,
                duration_ms,
                ..
            } => (Some(output.clone()), Some(*duration_ms)),
            _ => (None, None),
        };

        Self {
            base_name: result.base_name().to_string(),
            outcome: result.outcome(),
            output,
            duration_ms,
            detail: result.detail(),
        }
    }
}
