//! Host-side platform services: key and mouse translation, clipboard,
//! log delivery, crash reports and filesystem paths.

pub mod clipboard;
pub mod crash_report;
pub mod keymap;
pub mod log_sink;
pub mod mouse;
pub mod paths;

pub use clipboard::HostClipboard;
pub use keymap::{translate as translate_key, HostKeyCode, KeyInput};
pub use log_sink::{HostLogLayer, LogCallback, LogSink};
pub use mouse::{button_from_host, is_primary_button};
pub use paths::{crash_report_dir, data_dir};
