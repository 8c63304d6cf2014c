//! Configuration schema types for the plugin.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod browser;
mod engine;
mod logging;

pub use browser::*;
pub use engine::*;
pub use logging::*;

use serde::{Deserialize, Serialize};

/// File looked up inside the host's resources directory.
pub const CONFIG_FILE_NAME: &str = "servo_unity.toml";

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PluginConfig {
    pub logging: LoggingConfig,
    pub engine: EngineConfig,
    pub browser: BrowserConfig,
}
