mod args;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sidemux_core::{
    load_config, locate_engine, shutdown_channel, validate_config, BatchOptions, Engine,
    ItemProcessor, Orchestrator, RunStatus, TokioLauncher,
};

use args::Args;

/// Exit code when every item was converted or skipped.
const EXIT_OK: u8 = 0;

/// Exit code for fatal startup errors.
const EXIT_FATAL: u8 = 1;

/// Exit code when at least one item failed.
const EXIT_ITEMS_FAILED: u8 = 2;

/// Exit code after an interrupt, following the shell convention for SIGINT.
const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(args).await {
        Ok(status) => ExitCode::from(exit_code(status)),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run(args: Args) -> Result<RunStatus> {
    // Load configuration
    let mut config = load_config(&args.dir, args.config.as_deref())
        .context("Failed to load configuration")?;
    args.apply(&mut config);

    validate_config(&config).context("Configuration validation failed")?;

    if !config.batch.language.is_well_formed() {
        warn!(
            "Language tag {:?} is not a three-letter code, passing it on as is",
            config.batch.language.as_str()
        );
    }

    // Check the engine before touching any item
    let launcher = TokioLauncher::new();
    let resolved = locate_engine(&launcher, &config.engine.path)
        .await
        .context("Engine check failed")?;

    let engine = Engine::new(resolved, launcher).with_extra_args(config.engine.extra_args.clone());
    let processor = ItemProcessor::new(engine, config.extensions.clone());
    let orchestrator = Orchestrator::new(processor, BatchOptions::from(&config.batch));

    let (trigger, shutdown) = shutdown_channel();

    tokio::spawn(async move {
        shutdown_signal().await;
        warn!("Shutdown requested, stopping after in-flight items are cancelled");
        trigger.trigger();
    });

    info!(
        "Language {}, {} job(s)",
        config.batch.language, config.batch.jobs
    );

    let run = orchestrator
        .run(args.mode(), &config.batch.language, &args.dir, &shutdown)
        .await
        .context("Batch run failed")?;

    if args.json {
        let report = serde_json::to_string_pretty(&run.report())
            .context("Failed to serialize report")?;
        println!("{report}");
    }

    Ok(run.status())
}

fn exit_code(status: RunStatus) -> u8 {
    match status {
        RunStatus::Completed | RunStatus::NothingFound => EXIT_OK,
        RunStatus::ItemsFailed(_) => EXIT_ITEMS_FAILED,
        RunStatus::Cancelled => EXIT_CANCELLED,
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(RunStatus::Completed), 0);
        assert_eq!(exit_code(RunStatus::NothingFound), 0);
        assert_eq!(exit_code(RunStatus::ItemsFailed(3)), 2);
        assert_eq!(exit_code(RunStatus::Cancelled), 130);
    }
}
