//! Plugin configuration.
//!
//! Provides TOML-based configuration read from the host's resources
//! directory, full validation, and the runtime parameter store. All config
//! sections use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use servo_unity_config::load_config;
//!
//! let config = load_config(std::path::Path::new("/path/to/resources"));
//! println!("homepage: {}", config.browser.homepage);
//! ```

pub mod params;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use params::{ParamKey, ParamStore};
pub use schema::{
    BrowserConfig, EngineConfig, LogLevel, LoggingConfig, PluginConfig, CONFIG_FILE_NAME,
};

use std::path::Path;

/// Load `servo_unity.toml` from a resources directory.
///
/// Never fails: a missing, unparsable, or invalid file yields defaults.
pub fn load_config(resources_dir: &Path) -> PluginConfig {
    toml_loader::load_from_resources(resources_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_on_empty_dir_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path());
        assert!(config.browser.close_native_window_on_close);
        assert_eq!(config.logging.overflow_buffer_bytes, 4096);
    }
}
