//! Types for the item processor.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Extensions;
use crate::engine::{EngineError, EngineJob};
use crate::language::LanguageTag;

/// The role an input file plays in a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputRole {
    Audio,
    Image,
    Subtitle,
}

impl InputRole {
    /// All roles, in engine input order.
    pub const ALL: [InputRole; 3] = [InputRole::Audio, InputRole::Image, InputRole::Subtitle];

    /// The configured extension for this role.
    pub fn extension(self, extensions: &Extensions) -> &str {
        match self {
            InputRole::Audio => &extensions.audio,
            InputRole::Image => &extensions.image,
            InputRole::Subtitle => &extensions.subtitle,
        }
    }
}

impl fmt::Display for InputRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputRole::Audio => f.write_str("audio"),
            InputRole::Image => f.write_str("image"),
            InputRole::Subtitle => f.write_str("subtitle"),
        }
    }
}

/// One set of sidecar files sharing a base name.
///
/// All paths live in the same directory and are built by appending a fixed
/// extension to the base name, so base names containing dots are kept intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionItem {
    base_name: String,
    audio: PathBuf,
    image: PathBuf,
    subtitle: PathBuf,
    output: PathBuf,
}

impl ConversionItem {
    /// Derives the input and output paths for `base_name` in `dir`.
    pub fn new(dir: &Path, base_name: impl Into<String>, extensions: &Extensions) -> Self {
        let base_name = base_name.into();

        Self {
            audio: with_extension(dir, &base_name, &extensions.audio),
            image: with_extension(dir, &base_name, &extensions.image),
            subtitle: with_extension(dir, &base_name, &extensions.subtitle),
            output: with_extension(dir, &base_name, &extensions.output),
            base_name,
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Path of the input for the given role.
    pub fn input(&self, role: InputRole) -> &Path {
        match role {
            InputRole::Audio => &self.audio,
            InputRole::Image => &self.image,
            InputRole::Subtitle => &self.subtitle,
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Roles whose input is not an existing regular file.
    ///
    /// Only checks presence, never content.
    pub async fn missing_inputs(&self) -> Vec<InputRole> {
        let mut missing = Vec::new();

        for role in InputRole::ALL {
            let is_file = tokio::fs::metadata(self.input(role))
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);

            if !is_file {
                missing.push(role);
            }
        }

        missing
    }

    /// Whether all three inputs are present.
    pub async fn is_complete(&self) -> bool {
        self.missing_inputs().await.is_empty()
    }

    /// Builds the engine job for this item.
    pub fn to_job(&self, language: &LanguageTag) -> EngineJob {
        EngineJob {
            audio: self.audio.clone(),
            image: self.image.clone(),
            subtitle: self.subtitle.clone(),
            output: self.output.clone(),
            language: language.clone(),
        }
    }
}

fn with_extension(dir: &Path, base_name: &str, ext: &str) -> PathBuf {
    dir.join(format!("{base_name}.{ext}"))
}

/// Outcome kind of a processed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Converted,
    Skipped,
    Failed,
}

/// Result of processing one item.
#[derive(Debug)]
pub enum ConversionResult {
    /// The engine exited successfully.
    Converted {
        base_name: String,
        output: PathBuf,
        duration_ms: u64,
    },
    /// One or more inputs were missing, the engine was not run.
    Skipped {
        base_name: String,
        missing: Vec<InputRole>,
    },
    /// The engine could not be started or exited with an error.
    Failed {
        base_name: String,
        error: EngineError,
    },
}

impl ConversionResult {
    pub fn base_name(&self) -> &str {
        match self {
            Self::Converted { base_name, .. }
            | Self::Skipped { base_name, .. }
            | Self::Failed { base_name, .. } => base_name,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Converted { .. } => Outcome::Converted,
            Self::Skipped { .. } => Outcome::Skipped,
            Self::Failed { .. } => Outcome::Failed,
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Whether the engine was stopped by shutdown.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Failed { error, .. } if error.is_cancelled())
    }

    /// Human readable detail: missing inputs or the failure cause.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Converted { .. } => None,
            Self::Skipped { missing, .. } => {
                let missing: Vec<String> = missing.iter().map(ToString::to_string).collect();
                Some(format!("missing {}", missing.join(", ")))
            }
            Self::Failed { error, .. } => Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;
    use tempfile::TempDir;

    #[test]
    fn test_item_paths() {
        let item = ConversionItem::new(Path::new("/music"), "song", &Extensions::default());
        assert_eq!(item.base_name(), "song");
        assert_eq!(item.input(InputRole::Audio), Path::new("/music/song.flac"));
        assert_eq!(item.input(InputRole::Image), Path::new("/music/song.jpg"));
        assert_eq!(item.input(InputRole::Subtitle), Path::new("/music/song.lrc"));
        assert_eq!(item.output(), Path::new("/music/song.m4a"));
    }

    #[test]
    fn test_item_paths_keep_dots_in_base_name() {
        let item = ConversionItem::new(Path::new("/music"), "01. Intro", &Extensions::default());
        assert_eq!(item.input(InputRole::Audio), Path::new("/music/01. Intro.flac"));
        assert_eq!(item.output(), Path::new("/music/01. Intro.m4a"));
    }

    #[test]
    fn test_item_uses_configured_subtitle_extension() {
        let extensions = Extensions {
            subtitle: "lyc".to_string(),
            ..Default::default()
        };
        let item = ConversionItem::new(Path::new("/music"), "song", &extensions);
        assert_eq!(item.input(InputRole::Subtitle), Path::new("/music/song.lyc"));
    }

    #[tokio::test]
    async fn test_missing_inputs() {
        let dir = TempDir::new().unwrap();
        let extensions = Extensions::default();
        fixtures::item_with(dir.path(), "song", &extensions, &[InputRole::Audio]);

        let item = ConversionItem::new(dir.path(), "song", &extensions);
        assert_eq!(
            item.missing_inputs().await,
            vec![InputRole::Image, InputRole::Subtitle]
        );
        assert!(!item.is_complete().await);

        fixtures::complete_item(dir.path(), "song", &extensions);
        assert!(item.is_complete().await);
    }

    #[tokio::test]
    async fn test_directory_is_not_an_input() {
        let dir = TempDir::new().unwrap();
        let extensions = Extensions::default();
        fixtures::item_with(
            dir.path(),
            "song",
            &extensions,
            &[InputRole::Audio, InputRole::Image],
        );
        std::fs::create_dir(dir.path().join("song.lrc")).unwrap();

        let item = ConversionItem::new(dir.path(), "song", &extensions);
        assert_eq!(item.missing_inputs().await, vec![InputRole::Subtitle]);
    }

    #[test]
    fn test_to_job() {
        let item = ConversionItem::new(Path::new("/music"), "song", &Extensions::default());
        let job = item.to_job(&LanguageTag::new("eng"));
        assert_eq!(job.audio, PathBuf::from("/music/song.flac"));
        assert_eq!(job.output, PathBuf::from("/music/song.m4a"));
        assert_eq!(job.language.as_str(), "eng");
    }

    #[test]
    fn test_result_detail() {
        let skipped = ConversionResult::Skipped {
            base_name: "b".to_string(),
            missing: vec![InputRole::Image, InputRole::Subtitle],
        };
        assert_eq!(skipped.base_name(), "b");
        assert_eq!(skipped.outcome(), Outcome::Skipped);
        assert_eq!(skipped.detail().as_deref(), Some("missing image, subtitle"));

        let failed = ConversionResult::Failed {
            base_name: "c".to_string(),
            error: EngineError::NonZeroExit {
                code: 1,
                stderr: None,
            },
        };
        assert!(failed.is_failed());
        assert_eq!(failed.detail().as_deref(), Some("Engine exited with code 1"));
    }
}
