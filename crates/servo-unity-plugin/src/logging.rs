//! Subscriber and panic hook installation.

use std::path::PathBuf;
use std::sync::{Arc, Once, RwLock};

use servo_unity_platform::crash_report::write_crash_report;
use servo_unity_platform::{crash_report_dir, HostLogLayer, LogSink};
use tracing_subscriber::filter::{filter_fn, FilterExt};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the stderr filter directives.
pub const LOG_ENV: &str = "SERVO_UNITY_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

static INIT: Once = Once::new();

/// Install the global subscriber and the panic hook. Later calls do nothing.
///
/// Every event reaches the host callback through [`HostLogLayer`]. Until a
/// callback is registered, events also go to stderr, filtered by
/// `SERVO_UNITY_LOG`.
pub fn init(sink: Arc<LogSink>, resources: Arc<RwLock<Option<PathBuf>>>) {
    INIT.call_once(|| {
        let env = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        let gate = Arc::clone(&sink);
        let stderr = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(env.and(filter_fn(move |_| !gate.has_callback())));

        let installed = tracing_subscriber::registry()
            .with(HostLogLayer::new(sink))
            .with(stderr)
            .try_init();
        if installed.is_err() {
            eprintln!("servo-unity: a global tracing subscriber is already set");
        }

        install_panic_hook(resources);
    });
}

fn install_panic_hook(resources: Arc<RwLock<Option<PathBuf>>>) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let resources = resources.read().unwrap_or_else(|e| e.into_inner()).clone();
        let path = crash_report_dir(resources.as_deref())
            .ok()
            .and_then(|dir| write_crash_report(info, &dir));

        eprintln!("\n--- servo-unity plugin crashed ---");
        if let Some(p) = &path {
            eprintln!("Crash report written to: {}", p.display());
        }
        eprintln!("----------------------------------\n");

        default_hook(info);
    }));
}
