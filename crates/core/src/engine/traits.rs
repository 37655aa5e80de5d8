//! Trait definitions for the engine module.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;

use super::error::LaunchError;
use super::types::EngineExit;
use crate::shutdown::Shutdown;

/// Starts a program and waits for it to exit.
///
/// This is the only place a child process is created, tests substitute a
/// launcher that records arguments and returns scripted exits.
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Runs `program` with `args` (no shell) until it exits.
    ///
    /// If `shutdown` fires first the child is killed and
    /// [`LaunchError::Cancelled`] is returned.
    async fn launch(
        &self,
        program: &Path,
        args: &[OsString],
        shutdown: &Shutdown,
    ) -> Result<EngineExit, LaunchError>;
}
