//! Core TOML config loading: read from a path or from the resources directory.

use crate::schema::PluginConfig;
use crate::validation;
use servo_unity_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::config_path;

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. A config that parses but fails
/// validation is discarded with a warning and the defaults are returned.
pub fn load_from_path(path: &Path) -> Result<PluginConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: PluginConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(PluginConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the host's resources directory.
///
/// Never fails: an absent file yields defaults, and a broken one is
/// reported and replaced by defaults.
pub fn load_from_resources(resources_dir: &Path) -> PluginConfig {
    let path = config_path(resources_dir);
    match load_from_path(&path) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config at {}, using defaults", path.display());
            PluginConfig::default()
        }
        Err(e) => {
            warn!("config load failed, using defaults: {e}");
            PluginConfig::default()
        }
    }
}
