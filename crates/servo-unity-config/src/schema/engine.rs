//! Embedded engine start-up options.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Device pixel ratio handed to the engine (valid range: 0.5-4.0).
    pub density: f32,
    pub subpixel_text_antialiasing: bool,
    /// Module filters for the engine's own logger, e.g. `"script::dom"`.
    pub log_filters: Vec<String>,
    /// Extra command-line style arguments appended after the log level.
    pub extra_args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            subpixel_text_antialiasing: true,
            log_filters: Vec::new(),
            extra_args: Vec::new(),
        }
    }
}
