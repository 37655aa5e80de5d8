use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::language::LanguageTag;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub extensions: Extensions,
    #[serde(default)]
    pub batch: BatchConfig,
}

/// External engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Engine binary, either a bare name looked up on `PATH` or a full path.
    #[serde(default = "default_engine_path")]
    pub path: PathBuf,
    /// Extra arguments inserted right before `-y <output>`.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: default_engine_path(),
            extra_args: Vec::new(),
        }
    }
}

fn default_engine_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

/// File extensions (without the leading dot) for every role of an item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Extensions {
    #[serde(default = "default_audio_ext")]
    pub audio: String,
    #[serde(default = "default_image_ext")]
    pub image: String,
    /// Some libraries ship lyrics as `.lyc` instead of `.lrc`.
    #[serde(default = "default_subtitle_ext")]
    pub subtitle: String,
    #[serde(default = "default_output_ext")]
    pub output: String,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            audio: default_audio_ext(),
            image: default_image_ext(),
            subtitle: default_subtitle_ext(),
            output: default_output_ext(),
        }
    }
}

fn default_audio_ext() -> String {
    "flac".to_string()
}

fn default_image_ext() -> String {
    "jpg".to_string()
}

fn default_subtitle_ext() -> String {
    "lrc".to_string()
}

fn default_output_ext() -> String {
    "m4a".to_string()
}

/// Batch run configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Language tag attached to the subtitle stream.
    #[serde(default)]
    pub language: LanguageTag,
    /// Maximum number of items converted at the same time.
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            language: LanguageTag::default(),
            jobs: default_jobs(),
        }
    }
}

fn default_jobs() -> usize {
    1
}
