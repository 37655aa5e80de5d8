use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// File picked up from the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sidemux.toml";

/// Load configuration with environment variable overrides.
///
/// An explicit `path` must exist. Without one, `sidemux.toml` in `dir` is used
/// if present and built-in defaults otherwise.
pub fn load_config(dir: &Path, path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            path.to_path_buf()
        }
        None => dir.join(DEFAULT_CONFIG_FILE),
    };

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&file))
        .merge(Env::prefixed("SIDEMUX_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
