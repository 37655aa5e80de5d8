//! Types for the engine module.

use std::path::PathBuf;

use crate::language::LanguageTag;

/// Everything the engine needs to produce one output container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineJob {
    /// Lossless audio, mapped as input 0.
    pub audio: PathBuf,
    /// Cover image, mapped as input 1.
    pub image: PathBuf,
    /// Lyrics track, mapped as input 2.
    pub subtitle: PathBuf,
    /// Container to create or overwrite.
    pub output: PathBuf,
    /// Language written into the first subtitle stream.
    pub language: LanguageTag,
}

/// How a launched child process ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineExit {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    /// Trailing lines of the child's standard error.
    pub stderr_tail: Vec<String>,
}

impl EngineExit {
    /// An exit with the given code and no captured output.
    pub fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            stderr_tail: Vec::new(),
        }
    }

    /// Whether the process exited with status 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Captured stderr joined into one block, if any was captured.
    pub fn stderr(&self) -> Option<String> {
        if self.stderr_tail.is_empty() {
            None
        } else {
            Some(self.stderr_tail.join("\n"))
        }
    }
}

/// An engine binary that passed the startup check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEngine {
    path: PathBuf,
}

impl ResolvedEngine {
    /// Treats `path` as resolved without checking it.
    ///
    /// Used by tests and callers that performed their own check.
    pub fn assume(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
