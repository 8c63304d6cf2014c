use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::PanicHookInfo;
use std::path::{Path, PathBuf};

use crate::paths::ensure_dir;

use super::sanitize::sanitize_secrets;

/// Writes a crash report for a panic into `dir`.
///
/// Returns the path to the written report, or `None` if writing failed.
/// Runs inside a panic hook, so every error is swallowed.
pub fn write_crash_report(info: &PanicHookInfo, dir: &Path) -> Option<PathBuf> {
    let location = info
        .location()
        .map(|loc| serde_json::json!({ "file": loc.file(), "line": loc.line(), "column": loc.column() }));
    let backtrace = Backtrace::force_capture();
    write_report_json(dir, &payload_text(info.payload()), location, &backtrace.to_string())
}

/// Panic payloads are almost always `&str` or `String`.
pub(super) fn payload_text(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned())
}

pub(super) fn write_report_json(
    dir: &Path,
    message: &str,
    location: Option<serde_json::Value>,
    backtrace: &str,
) -> Option<PathBuf> {
    let now = chrono::Utc::now();
    let report = serde_json::json!({
        "timestamp": now.to_rfc3339(),
        "plugin_version": env!("CARGO_PKG_VERSION"),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
        "thread": std::thread::current().name().unwrap_or("<unnamed>"),
        "panic_message": sanitize_secrets(message),
        "location": location,
        "backtrace": sanitize_secrets(backtrace),
    });
    let body = serde_json::to_string_pretty(&report).ok()?;

    ensure_dir(dir).ok()?;
    let path = dir.join(format!("crash_{}.json", now.format("%Y%m%d_%H%M%S")));
    std::fs::write(&path, body).ok()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600));
    }

    Some(path)
}
