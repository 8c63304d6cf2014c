use std::path::PathBuf;

use crate::types::WindowId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("clipboard error: {0}")]
    ClipboardError(String),

    #[error("path error: {0}")]
    PathError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Failures reported by the embedded engine boundary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    #[error("engine init failed: {0}")]
    InitFailed(String),
}

/// Failures of window lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("unknown window: {0}")]
    UnknownWindow(WindowId),

    #[error("{0} is already registered")]
    DuplicateWindow(WindowId),

    #[error("no graphics backend is active")]
    NoBackend,

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("engine already driven by {active}, {requested} refused")]
    EngineBusy {
        active: WindowId,
        requested: WindowId,
    },

    #[error("engine start failed for {window}: {source}")]
    EngineStart {
        window: WindowId,
        #[source]
        source: EngineError,
    },

    #[error("{0} has been torn down")]
    TornDown(WindowId),
}

#[derive(Debug, thiserror::Error)]
pub enum ServoUnityError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("engine.density = 9 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: engine.density = 9 is out of range"
        );
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::ClipboardError("access denied".into());
        assert_eq!(err.to_string(), "clipboard error: access denied");

        let err = PlatformError::NotSupported("wayland".into());
        assert_eq!(err.to_string(), "not supported: wayland");
    }

    #[test]
    fn window_error_display() {
        let err = WindowError::UnknownWindow(WindowId(7));
        assert_eq!(err.to_string(), "unknown window: window-7");

        let err = WindowError::EngineBusy {
            active: WindowId(1),
            requested: WindowId(2),
        };
        assert_eq!(
            err.to_string(),
            "engine already driven by window-1, window-2 refused"
        );

        let err = WindowError::EngineStart {
            window: WindowId(3),
            source: EngineError::InitFailed("no gl".into()),
        };
        assert_eq!(
            err.to_string(),
            "engine start failed for window-3: engine init failed: no gl"
        );

        assert_eq!(
            WindowError::NoBackend.to_string(),
            "no graphics backend is active"
        );
        assert_eq!(
            WindowError::TornDown(WindowId(4)).to_string(),
            "window-4 has been torn down"
        );
    }

    #[test]
    fn umbrella_from_config() {
        let err: ServoUnityError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, ServoUnityError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn umbrella_from_window() {
        let err: ServoUnityError = WindowError::NoBackend.into();
        assert!(matches!(err, ServoUnityError::Window(_)));
    }

    #[test]
    fn umbrella_from_engine() {
        let err: ServoUnityError = EngineError::Unavailable("not linked".into()).into();
        assert!(matches!(err, ServoUnityError::Engine(_)));
        assert_eq!(err.to_string(), "engine unavailable: not linked");
    }

    #[test]
    fn umbrella_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ServoUnityError = io_err.into();
        assert!(matches!(err, ServoUnityError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn umbrella_other() {
        let err = ServoUnityError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
