use std::path::{Path, PathBuf};

use servo_unity_common::PlatformError;

pub(super) const APP_NAME: &str = "servo_unity";
pub(super) const CRASH_DIR_NAME: &str = "crash";

/// Returns the platform-specific data directory for the plugin.
///
/// - macOS: `~/Library/Application Support/servo_unity`
/// - Linux: `$XDG_DATA_HOME/servo_unity` (defaults to `~/.local/share/servo_unity`)
/// - Windows: `%APPDATA%\servo_unity`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Returns the crash report directory.
///
/// `<resources>/crash` when the host has set a resources path, otherwise
/// `data_dir()/crash`.
pub fn crash_report_dir(resources_dir: Option<&Path>) -> Result<PathBuf, PlatformError> {
    match resources_dir {
        Some(dir) => Ok(dir.join(CRASH_DIR_NAME)),
        None => Ok(data_dir()?.join(CRASH_DIR_NAME)),
    }
}

/// Creates `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), PlatformError> {
    std::fs::create_dir_all(dir).map_err(|e| PlatformError::PathError(e.to_string()))
}
