mod resolve;

pub use resolve::{crash_report_dir, data_dir, ensure_dir};
