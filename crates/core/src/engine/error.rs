//! Error types for the engine module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by a [`Launcher`](super::Launcher).
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The child process could not be spawned.
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the child process failed.
    #[error("Failed to wait for engine: {0}")]
    Wait(#[source] std::io::Error),

    /// Shutdown was requested while the child was running; it has been killed.
    #[error("Launch cancelled")]
    Cancelled,
}

/// Errors that can occur while running the engine for one item.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be located at startup.
    #[error("Engine not available at {program}: {reason}")]
    NotFound { program: PathBuf, reason: String },

    /// The engine process could not be started.
    #[error("Failed to launch engine {program}: {source}")]
    LaunchFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine exited with a non-zero status.
    #[error("Engine exited with code {code}")]
    NonZeroExit { code: i32, stderr: Option<String> },

    /// The engine was terminated by a signal.
    #[error("Engine terminated without an exit code")]
    Terminated { stderr: Option<String> },

    /// I/O error while supervising the engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The run was cancelled while the engine was running.
    #[error("Conversion cancelled")]
    Cancelled,
}

impl EngineError {
    /// Creates a new not found error.
    pub fn not_found(program: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::NotFound {
            program: program.into(),
            reason: reason.into(),
        }
    }

    /// Diagnostic output captured from the engine, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::NonZeroExit { stderr, .. } | Self::Terminated { stderr } => stderr.as_deref(),
            _ => None,
        }
    }

    /// Whether this error is the result of cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<LaunchError> for EngineError {
    fn from(error: LaunchError) -> Self {
        match error {
            LaunchError::Spawn { program, source } => Self::LaunchFailed { program, source },
            LaunchError::Wait(source) => Self::Io(source),
            LaunchError::Cancelled => Self::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_spawn_maps_to_launch_failed() {
        let error = LaunchError::Spawn {
            program: PathBuf::from("ffmpeg"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };

        let error = EngineError::from(error);
        assert!(matches!(error, EngineError::LaunchFailed { .. }));
        assert!(error.to_string().contains("ffmpeg"));
    }

    #[test]
    fn test_cancelled_maps_to_cancelled() {
        assert!(EngineError::from(LaunchError::Cancelled).is_cancelled());
    }

    #[test]
    fn test_stderr_accessor() {
        let error = EngineError::NonZeroExit {
            code: 1,
            stderr: Some("Invalid data found when processing input".to_string()),
        };
        assert_eq!(error.to_string(), "Engine exited with code 1");
        assert!(error.stderr().unwrap().contains("Invalid data"));
        assert!(EngineError::Cancelled.stderr().is_none());
    }
}
