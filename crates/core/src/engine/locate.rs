//! Startup check for the engine binary.

use std::ffi::OsString;
use std::path::Path;
use tracing::{debug, info};

use super::error::{EngineError, LaunchError};
use super::traits::Launcher;
use super::types::ResolvedEngine;
use crate::shutdown::Shutdown;

/// Verifies that `program` can be launched, by running `<program> -version`.
///
/// Must succeed before any item is processed; the returned engine is what
/// gets handed to [`Engine::new`](super::Engine::new).
pub async fn locate_engine<L>(launcher: &L, program: &Path) -> Result<ResolvedEngine, EngineError>
where
    L: Launcher + ?Sized,
{
    debug!("Checking engine at {}", program.display());

    let exit = launcher
        .launch(program, &[OsString::from("-version")], &Shutdown::never())
        .await
        .map_err(|e| match e {
            LaunchError::Spawn { source, .. } => EngineError::not_found(program, source.to_string()),
            other => EngineError::not_found(program, other.to_string()),
        })?;

    if !exit.success() {
        let reason = match exit.code {
            Some(code) => format!("version check exited with code {code}"),
            None => "version check was terminated".to_string(),
        };
        return Err(EngineError::not_found(program, reason));
    }

    info!("Using engine {}", program.display());
    Ok(ResolvedEngine::assume(program))
}
