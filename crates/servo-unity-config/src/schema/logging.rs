//! Logging configuration types.

use serde::{Deserialize, Serialize};

/// Log severity threshold. Ordered from most to least verbose.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Decode a host log level. Negative values are rejected; values past
    /// the last level clamp to `Error`.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            i32::MIN..=-1 => None,
            0 => Some(Self::Debug),
            1 => Some(Self::Info),
            2 => Some(Self::Warn),
            _ => Some(Self::Error),
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warn => 2,
            Self::Error => 3,
        }
    }

    /// Label used in the host-facing line prefix, e.g. `[warning] `.
    pub fn label(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warning",
            Self::Error => "error",
        }
    }

    /// Value passed to the engine's `--vslogger-level` argument.
    pub fn engine_arg(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Deliver host callbacks only on the thread that registered them.
    pub callback_same_thread_only: bool,
    /// Capacity of the buffer holding messages logged on other threads
    /// (valid range: 256-65536).
    pub overflow_buffer_bytes: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            callback_same_thread_only: true,
            overflow_buffer_bytes: 4096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_maps_levels() {
        assert_eq!(LogLevel::from_raw(0), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_raw(1), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_raw(2), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_raw(3), Some(LogLevel::Error));
    }

    #[test]
    fn from_raw_rejects_negative_and_clamps_high() {
        assert_eq!(LogLevel::from_raw(-1), None);
        assert_eq!(LogLevel::from_raw(4), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_raw(i32::MAX), Some(LogLevel::Error));
    }

    #[test]
    fn ordering_is_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn labels() {
        assert_eq!(LogLevel::Warn.label(), "warning");
        assert_eq!(LogLevel::Warn.engine_arg(), "warn");
        assert_eq!(LogLevel::Debug.label(), "debug");
    }

    #[test]
    fn deserializes_uppercase() {
        let cfg: LoggingConfig = toml::from_str("level = \"WARN\"").unwrap();
        assert_eq!(cfg.level, LogLevel::Warn);
        assert!(cfg.callback_same_thread_only);
        assert_eq!(cfg.overflow_buffer_bytes, 4096);
    }
}
