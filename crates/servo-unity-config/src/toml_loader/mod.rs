//! TOML config file loading.

mod loader;
mod paths;


pub use loader::{load_from_path, load_from_resources};
pub use paths::config_path;
