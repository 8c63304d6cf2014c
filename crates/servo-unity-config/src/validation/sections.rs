//! Per-section validators.

use crate::schema::PluginConfig;

use super::helpers::{validate_non_empty, validate_range, validate_range_f32};

pub(super) fn validate_logging(errors: &mut Vec<String>, config: &PluginConfig) {
    validate_range(
        errors,
        "logging.overflow_buffer_bytes",
        config.logging.overflow_buffer_bytes,
        256,
        65536,
    );
}

pub(super) fn validate_engine(errors: &mut Vec<String>, config: &PluginConfig) {
    validate_range_f32(errors, "engine.density", config.engine.density, 0.5, 4.0);

    for (i, filter) in config.engine.log_filters.iter().enumerate() {
        if filter.trim().is_empty() {
            errors.push(format!("engine.log_filters[{i}] must not be empty"));
        }
    }
}

pub(super) fn validate_browser(errors: &mut Vec<String>, config: &PluginConfig) {
    validate_non_empty(errors, "browser.homepage", &config.browser.homepage);
    validate_non_empty(errors, "browser.search_uri", &config.browser.search_uri);
}
