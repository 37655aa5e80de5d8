//! Item processor implementation.

use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::config::Extensions;
use crate::engine::{Engine, Launcher};
use crate::language::LanguageTag;
use crate::shutdown::Shutdown;

use super::types::{ConversionItem, ConversionResult};

/// Checks one item for completeness and converts it.
pub struct ItemProcessor<L: Launcher> {
    engine: Engine<L>,
    extensions: Extensions,
}

impl<L: Launcher> ItemProcessor<L> {
    /// Creates a new item processor.
    pub fn new(engine: Engine<L>, extensions: Extensions) -> Self {
        Self { engine, extensions }
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Derives the item for `base_name` in `dir`.
    pub fn item(&self, dir: &Path, base_name: &str) -> ConversionItem {
        ConversionItem::new(dir, base_name, &self.extensions)
    }

    /// Processes `base_name` in `dir`, writing the output next to the inputs.
    ///
    /// Never fails: missing inputs and engine errors are part of the result.
    pub async fn process(
        &self,
        base_name: &str,
        language: &LanguageTag,
        dir: &Path,
        shutdown: &Shutdown,
    ) -> ConversionResult {
        let item = self.item(dir, base_name);
        self.process_item(&item, language, shutdown).await
    }

    /// Processes an already derived item.
    pub async fn process_item(
        &self,
        item: &ConversionItem,
        language: &LanguageTag,
        shutdown: &Shutdown,
    ) -> ConversionResult {
        let base_name = item.base_name().to_string();
        let missing = item.missing_inputs().await;

        if !missing.is_empty() {
            let roles: Vec<String> = missing.iter().map(ToString::to_string).collect();
            warn!("Skipping {}: missing {}", base_name, roles.join(", "));
            return ConversionResult::Skipped { base_name, missing };
        }

        let start = Instant::now();
        let job = item.to_job(language);

        match self.engine.invoke(&job, shutdown).await {
            Ok(()) => {
                let duration_ms = millis(start.elapsed());
                info!(
                    "Converted {} -> {} ({} ms)",
                    base_name,
                    item.output().display(),
                    duration_ms
                );
                ConversionResult::Converted {
                    base_name,
                    output: item.output().to_path_buf(),
                    duration_ms,
                }
            }
            Err(e) => {
                error!("Failed to convert {}: {}", base_name, e);

                if let Some(stderr) = e.stderr() {
                    error!("Engine output for {}:\n{}", base_name, stderr);
                }

                ConversionResult::Failed {
                    base_name,
                    error: e,
                }
            }
        }
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{build_args, EngineError, EngineExit, ResolvedEngine};
    use crate::processor::InputRole;
    use crate::testing::{fixtures, MockLauncher};
    use tempfile::TempDir;

    fn processor(launcher: &MockLauncher) -> ItemProcessor<MockLauncher> {
        let engine = Engine::new(ResolvedEngine::assume("ffmpeg"), launcher.clone());
        ItemProcessor::new(engine, Extensions::default())
    }

    #[tokio::test]
    async fn test_complete_item_is_converted() {
        let dir = TempDir::new().unwrap();
        fixtures::complete_item(dir.path(), "song", &Extensions::default());
        let launcher = MockLauncher::new();
        let processor = processor(&launcher);

        let lang = LanguageTag::new("eng");
        let result = processor
            .process("song", &lang, dir.path(), &Shutdown::never())
            .await;

        assert!(result.is_converted());
        assert_eq!(result.base_name(), "song");

        let launches = launcher.recorded_launches().await;
        assert_eq!(launches.len(), 1);

        let expected = build_args(&processor.item(dir.path(), "song").to_job(&lang), &[]);
        assert_eq!(launches[0].args, expected);
    }

    #[tokio::test]
    async fn test_incomplete_item_is_skipped_without_engine() {
        let dir = TempDir::new().unwrap();
        fixtures::item_with(
            dir.path(),
            "song",
            &Extensions::default(),
            &[InputRole::Audio, InputRole::Subtitle],
        );
        let launcher = MockLauncher::new();
        let processor = processor(&launcher);

        let result = processor
            .process("song", &LanguageTag::default(), dir.path(), &Shutdown::never())
            .await;

        match result {
            ConversionResult::Skipped { base_name, missing } => {
                assert_eq!(base_name, "song");
                assert_eq!(missing, vec![InputRole::Image]);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        assert_eq!(launcher.launch_count().await, 0);
    }

    #[tokio::test]
    async fn test_engine_failure_is_failed() {
        let dir = TempDir::new().unwrap();
        fixtures::complete_item(dir.path(), "song", &Extensions::default());
        let launcher = MockLauncher::new();
        launcher.set_default_exit(EngineExit::with_code(1)).await;
        let processor = processor(&launcher);

        let result = processor
            .process("song", &LanguageTag::default(), dir.path(), &Shutdown::never())
            .await;

        match result {
            ConversionResult::Failed { error, .. } => {
                assert!(matches!(error, EngineError::NonZeroExit { code: 1, .. }));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_launch_failure_is_failed() {
        let dir = TempDir::new().unwrap();
        fixtures::complete_item(dir.path(), "song", &Extensions::default());
        let launcher = MockLauncher::new();
        launcher.fail_to_spawn().await;
        let processor = processor(&launcher);

        let result = processor
            .process("song", &LanguageTag::default(), dir.path(), &Shutdown::never())
            .await;

        match result {
            ConversionResult::Failed { error, .. } => {
                assert!(matches!(error, EngineError::LaunchFailed { .. }));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_process_twice_overwrites_output() {
        let dir = TempDir::new().unwrap();
        fixtures::complete_item(dir.path(), "song", &Extensions::default());
        let launcher = MockLauncher::new();
        launcher.set_write_output(true).await;
        let processor = processor(&launcher);
        let lang = LanguageTag::default();

        let first = processor
            .process("song", &lang, dir.path(), &Shutdown::never())
            .await;
        let output = dir.path().join("song.m4a");
        let first_content = std::fs::read(&output).unwrap();

        let second = processor
            .process("song", &lang, dir.path(), &Shutdown::never())
            .await;
        let second_content = std::fs::read(&output).unwrap();

        assert!(first.is_converted());
        assert!(second.is_converted());
        assert_eq!(first_content, second_content);
        assert_eq!(launcher.launch_count().await, 2);
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
