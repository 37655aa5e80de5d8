pub mod config;
pub mod discovery;
pub mod engine;
pub mod language;
pub mod orchestrator;
pub mod processor;
pub mod shutdown;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, BatchConfig, Config, ConfigError,
    EngineConfig, Extensions,
};
pub use discovery::{discover, DiscoveryError};
pub use engine::{
    locate_engine, Engine, EngineError, EngineJob, LaunchError, Launcher, ResolvedEngine,
    TokioLauncher,
};
pub use language::LanguageTag;
pub use orchestrator::{
    BatchOptions, BatchReport, BatchRun, BatchSummary, Orchestrator, OrchestratorError, RunMode,
    RunStatus,
};
pub use processor::{ConversionItem, ConversionResult, InputRole, ItemProcessor};
pub use shutdown::{shutdown_channel, Shutdown, ShutdownTrigger};
