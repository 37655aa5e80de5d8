//! Tokio-based child process launcher.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::debug;

use super::error::LaunchError;
use super::traits::Launcher;
use super::types::EngineExit;
use crate::shutdown::Shutdown;

/// Default number of stderr lines kept for diagnostics.
const DEFAULT_STDERR_TAIL: usize = 20;

/// Launches real child processes through [`tokio::process`].
#[derive(Debug, Clone)]
pub struct TokioLauncher {
    stderr_tail: usize,
}

impl Default for TokioLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl TokioLauncher {
    pub fn new() -> Self {
        Self {
            stderr_tail: DEFAULT_STDERR_TAIL,
        }
    }

    /// Sets how many trailing stderr lines are kept.
    pub fn with_stderr_tail(mut self, lines: usize) -> Self {
        self.stderr_tail = lines;
        self
    }
}

/// Drains `reader`, logging every line and keeping the last `keep` of them.
async fn collect_tail<R>(reader: Option<R>, keep: usize) -> VecDeque<String>
where
    R: AsyncRead + Unpin,
{
    let mut tail = VecDeque::with_capacity(keep);

    let Some(reader) = reader else {
        return tail;
    };

    let mut lines = BufReader::new(reader).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        debug!(target: "sidemux::engine", "{}", line);

        if keep == 0 {
            continue;
        }

        if tail.len() == keep {
            tail.pop_front();
        }

        tail.push_back(line);
    }

    tail
}

#[async_trait]
impl Launcher for TokioLauncher {
    async fn launch(
        &self,
        program: &Path,
        args: &[OsString],
        shutdown: &Shutdown,
    ) -> Result<EngineExit, LaunchError> {
        if shutdown.is_triggered() {
            return Err(LaunchError::Cancelled);
        }

        debug!("Launching {} {:?}", program.display(), args);

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        let stderr = child.stderr.take();

        let finished = {
            let run = async { tokio::join!(child.wait(), collect_tail(stderr, self.stderr_tail)) };

            tokio::select! {
                biased;
                _ = shutdown.triggered() => None,
                (status, tail) = run => Some((status, tail)),
            }
        };

        let Some((status, tail)) = finished else {
            debug!("Shutdown requested, killing {}", program.display());
            // The child may already have exited on its own
            let _ = child.kill().await;
            return Err(LaunchError::Cancelled);
        };

        let status = status.map_err(LaunchError::Wait)?;

        settle(
            EngineExit {
                code: status.code(),
                stderr_tail: tail.into(),
            },
            shutdown,
        )
    }
}

/// Classifies an exit that raced with shutdown.
///
/// A terminal interrupt reaches the child as well, so a failed exit observed
/// once shutdown has fired counts as a cancellation.
fn settle(exit: EngineExit, shutdown: &Shutdown) -> Result<EngineExit, LaunchError> {
    if !exit.success() && shutdown.is_triggered() {
        return Err(LaunchError::Cancelled);
    }

    Ok(exit)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::shutdown::shutdown_channel;
    use std::time::{Duration, Instant};

    fn sh(script: &str) -> Vec<OsString> {
        vec!["-c".into(), script.into()]
    }

    #[tokio::test]
    async fn test_launch_success() {
        let launcher = TokioLauncher::new();
        let exit = launcher
            .launch(Path::new("sh"), &sh("exit 0"), &Shutdown::never())
            .await
            .unwrap();
        assert!(exit.success());
    }

    #[tokio::test]
    async fn test_launch_non_zero_with_stderr() {
        let launcher = TokioLauncher::new().with_stderr_tail(2);
        let exit = launcher
            .launch(
                Path::new("sh"),
                &sh("echo one >&2; echo two >&2; echo three >&2; exit 3"),
                &Shutdown::never(),
            )
            .await
            .unwrap();

        assert_eq!(exit.code, Some(3));
        assert_eq!(exit.stderr_tail, vec!["two", "three"]);
    }

    #[tokio::test]
    async fn test_launch_missing_binary() {
        let launcher = TokioLauncher::new();
        let err = launcher
            .launch(
                Path::new("/nonexistent/sidemux-engine"),
                &[],
                &Shutdown::never(),
            )
            .await
            .unwrap_err();

        match err {
            LaunchError::Spawn { program, source } => {
                assert_eq!(program, Path::new("/nonexistent/sidemux-engine"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_launch_cancelled_kills_child() {
        let launcher = TokioLauncher::new();
        let (trigger, shutdown) = shutdown_channel();

        let start = Instant::now();
        let task = tokio::spawn(async move {
            launcher
                .launch(Path::new("sleep"), &[OsString::from("30")], &shutdown)
                .await
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.trigger();

        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("launch should return after shutdown")
            .unwrap();

        assert!(matches!(result, Err(LaunchError::Cancelled)));
        assert!(start.elapsed() < Duration::from_secs(30));
    }

    #[test]
    fn test_failed_exit_after_shutdown_is_cancelled() {
        let (trigger, shutdown) = shutdown_channel();
        trigger.trigger();

        let interrupted = settle(EngineExit::with_code(255), &shutdown);
        assert!(matches!(interrupted, Err(LaunchError::Cancelled)));

        let finished = settle(EngineExit::with_code(0), &shutdown).unwrap();
        assert!(finished.success());
    }

    #[test]
    fn test_failed_exit_without_shutdown_is_kept() {
        let exit = settle(EngineExit::with_code(1), &Shutdown::never()).unwrap();
        assert_eq!(exit.code, Some(1));
    }

    #[tokio::test]
    async fn test_launch_after_shutdown_does_not_spawn() {
        let launcher = TokioLauncher::new();
        let (trigger, shutdown) = shutdown_channel();
        trigger.trigger();

        let result = launcher
            .launch(Path::new("/nonexistent/sidemux-engine"), &[], &shutdown)
            .await;
        assert!(matches!(result, Err(LaunchError::Cancelled)));
    }
}
