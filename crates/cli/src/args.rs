//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use sidemux_core::{Config, LanguageTag, RunMode};

/// Mux lossless audio, cover art and lyrics that share a base name into
/// tagged containers.
///
/// With BASE_NAME only that item is converted, otherwise every audio file
/// in the working directory is a candidate.
#[derive(Debug, Parser)]
#[command(name = "sidemux", author, version, about, max_term_width = 80)]
pub struct Args {
    /// Base name (file name without extension) of a single item to convert.
    pub base_name: Option<String>,

    /// Language tag written to the lyrics stream, e.g. `chi`, `eng`, `jpn`.
    #[arg(short, long, value_name = "LANG")]
    pub lang: Option<LanguageTag>,

    /// Directory holding the inputs, outputs are written next to them.
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Number of items converted at the same time.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Path to the engine binary.
    #[arg(long, value_name = "PATH")]
    pub engine: Option<PathBuf>,

    /// Configuration file, defaults to `sidemux.toml` in the working directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print a JSON report of the run on stdout.
    #[arg(long)]
    pub json: bool,

    /// Log debug output, including the engine's own messages.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Run mode selected by the positional argument.
    pub fn mode(&self) -> RunMode {
        RunMode::from_base_name(self.base_name.clone())
    }

    /// Applies command line overrides on top of loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(lang) = &self.lang {
            config.batch.language = lang.clone();
        }

        if let Some(jobs) = self.jobs {
            config.batch.jobs = jobs;
        }

        if let Some(engine) = &self.engine {
            config.engine.path = engine.clone();
        }
    }
}
