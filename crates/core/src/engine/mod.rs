//! Engine module for driving the external transcoder.
//!
//! This module builds the fixed argument contract for one conversion and runs
//! the engine (`ffmpeg` by default) as a child process through a [`Launcher`].
//!
//! # Example
//!
//! ```ignore
//! use sidemux_core::engine::{locate_engine, Engine, EngineJob, TokioLauncher};
//!
//! let launcher = TokioLauncher::new();
//! let resolved = locate_engine(&launcher, Path::new("ffmpeg")).await?;
//! let engine = Engine::new(resolved, launcher);
//!
//! engine.invoke(&job, &Shutdown::never()).await?;
//! ```

mod args;
mod error;
mod invoker;
mod locate;
mod process;
mod traits;
mod types;

pub use args::build_args;
pub use error::{EngineError, LaunchError};
pub use invoker::Engine;
pub use locate::locate_engine;
pub use process::TokioLauncher;
pub use traits::Launcher;
pub use types::{EngineExit, EngineJob, ResolvedEngine};
