use std::collections::HashSet;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Engine path is not empty
/// - Every extension is a bare, non-empty suffix without dots
/// - Extensions are distinct from each other
/// - At least one job
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.engine.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "engine.path cannot be empty".to_string(),
        ));
    }

    let ext = &config.extensions;
    let roles = [
        ("audio", &ext.audio),
        ("image", &ext.image),
        ("subtitle", &ext.subtitle),
        ("output", &ext.output),
    ];

    let mut seen = HashSet::new();

    for (role, value) in roles {
        if value.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "extensions.{role} cannot be empty"
            )));
        }

        if value.contains(|c: char| c == '.' || c == '/' || c == '\\') {
            return Err(ConfigError::ValidationError(format!(
                "extensions.{role} must be a bare extension, got {value:?}"
            )));
        }

        if !seen.insert(value.to_lowercase()) {
            return Err(ConfigError::ValidationError(format!(
                "extensions.{role} ({value:?}) is already used by another role"
            )));
        }
    }

    if config.batch.jobs == 0 {
        return Err(ConfigError::ValidationError(
            "batch.jobs must be at least 1".to_string(),
        ));
    }

    Ok(())
}
