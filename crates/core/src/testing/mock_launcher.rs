//! Mock launcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::engine::{EngineExit, LaunchError, Launcher};
use crate::shutdown::Shutdown;

/// A recorded launch for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLaunch {
    /// The program that was launched.
    pub program: PathBuf,
    /// The arguments it was launched with.
    pub args: Vec<OsString>,
}

impl RecordedLaunch {
    /// The last argument, which is the output path for engine invocations.
    pub fn output(&self) -> Option<&Path> {
        self.args.last().map(Path::new)
    }
}

/// Mock implementation of the Launcher trait.
///
/// Provides controllable behavior for testing:
/// - Track launches (program and arguments) for assertions
/// - Script exit codes, globally or per output path
/// - Simulate a binary that cannot be spawned
/// - Emulate the engine by writing the output file
/// - Simulate slow conversions, honoring shutdown
///
/// # Example
///
/// ```rust,ignore
/// use sidemux_core::testing::MockLauncher;
///
/// let launcher = MockLauncher::new();
/// launcher.set_exit_for("/music/b.m4a", EngineExit::with_code(1)).await;
///
/// let engine = Engine::new(ResolvedEngine::assume("ffmpeg"), launcher.clone());
/// // ...
///
/// assert_eq!(launcher.launch_count().await, 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockLauncher {
    /// Recorded launches.
    launches: Arc<RwLock<Vec<RecordedLaunch>>>,
    /// Exit returned when no per-output exit is configured.
    default_exit: Arc<RwLock<EngineExit>>,
    /// Exits keyed by the last argument.
    exits_by_output: Arc<RwLock<HashMap<OsString, EngineExit>>>,
    /// Whether every launch fails to spawn.
    spawn_fails: Arc<RwLock<bool>>,
    /// Whether successful `-y` launches write their output file.
    write_output: Arc<RwLock<bool>>,
    /// Simulated run time of each launch.
    delay: Arc<RwLock<Duration>>,
    /// Launches currently in flight.
    active: Arc<AtomicUsize>,
    /// Highest number of launches observed in flight at once.
    max_active: Arc<AtomicUsize>,
}

impl Default for MockLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLauncher {
    /// Create a new mock launcher whose launches exit with status 0.
    pub fn new() -> Self {
        Self {
            launches: Arc::new(RwLock::new(Vec::new())),
            default_exit: Arc::new(RwLock::new(EngineExit::with_code(0))),
            exits_by_output: Arc::new(RwLock::new(HashMap::new())),
            spawn_fails: Arc::new(RwLock::new(false)),
            write_output: Arc::new(RwLock::new(false)),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
            active: Arc::new(AtomicUsize::new(0)),
            max_active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get all recorded launches.
    pub async fn recorded_launches(&self) -> Vec<RecordedLaunch> {
        self.launches.read().await.clone()
    }

    /// Get the number of launches performed.
    pub async fn launch_count(&self) -> usize {
        self.launches.read().await.len()
    }

    /// Set the exit returned for launches without a per-output exit.
    pub async fn set_default_exit(&self, exit: EngineExit) {
        *self.default_exit.write().await = exit;
    }

    /// Set the exit returned for launches whose last argument is `output`.
    pub async fn set_exit_for(&self, output: impl AsRef<Path>, exit: EngineExit) {
        self.exits_by_output
            .write()
            .await
            .insert(output.as_ref().as_os_str().to_os_string(), exit);
    }

    /// Make every following launch fail as if the binary did not exist.
    pub async fn fail_to_spawn(&self) {
        *self.spawn_fails.write().await = true;
    }

    /// Write the output file on successful launches that pass `-y`.
    pub async fn set_write_output(&self, write: bool) {
        *self.write_output.write().await = write;
    }

    /// Set the simulated duration of each launch.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    /// Highest number of concurrent launches observed so far.
    pub fn max_concurrent(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    /// Content written for an emulated output, derived only from the arguments.
    pub fn output_content(args: &[OsString]) -> String {
        let lines: Vec<_> = args.iter().map(|arg| arg.to_string_lossy()).collect();
        format!("sidemux-mock\n{}\n", lines.join("\n"))
    }

    async fn exit_for(&self, args: &[OsString]) -> EngineExit {
        if let Some(output) = args.last() {
            if let Some(exit) = self.exits_by_output.read().await.get(output) {
                return exit.clone();
            }
        }

        self.default_exit.read().await.clone()
    }

    async fn run(&self, args: &[OsString], shutdown: &Shutdown) -> Result<EngineExit, LaunchError> {
        let delay = *self.delay.read().await;

        if !delay.is_zero() {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.triggered() => return Err(LaunchError::Cancelled),
            }
        }

        let exit = self.exit_for(args).await;

        let overwrite = args.len() >= 2 && args[args.len() - 2] == "-y";

        if exit.success() && overwrite && *self.write_output.read().await {
            if let Some(output) = args.last() {
                tokio::fs::write(output, Self::output_content(args))
                    .await
                    .map_err(LaunchError::Wait)?;
            }
        }

        Ok(exit)
    }
}

#[async_trait]
impl Launcher for MockLauncher {
    async fn launch(
        &self,
        program: &Path,
        args: &[OsString],
        shutdown: &Shutdown,
    ) -> Result<EngineExit, LaunchError> {
        if shutdown.is_triggered() {
            return Err(LaunchError::Cancelled);
        }

        self.launches.write().await.push(RecordedLaunch {
            program: program.to_path_buf(),
            args: args.to_vec(),
        });

        if *self.spawn_fails.read().await {
            return Err(LaunchError::Spawn {
                program: program.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock: no such file"),
            });
        }

        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        let result = self.run(args, shutdown).await;

        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
