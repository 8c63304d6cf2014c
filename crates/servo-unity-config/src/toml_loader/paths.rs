//! Config path resolution.

use std::path::{Path, PathBuf};

use crate::schema::CONFIG_FILE_NAME;

/// Location of the config file inside a resources directory.
pub fn config_path(resources_dir: &Path) -> PathBuf {
    resources_dir.join(CONFIG_FILE_NAME)
}
