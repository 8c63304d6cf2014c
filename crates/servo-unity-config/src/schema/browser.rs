//! Browser behaviour defaults. These seed the runtime parameter store.

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOMEPAGE: &str = "https://mozilla.org/";
pub const DEFAULT_SEARCH_URI: &str = "https://duckduckgo.com/?q=%s";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub homepage: String,
    /// Search template; `%s` is replaced by the query.
    pub search_uri: String,
    pub close_native_window_on_close: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            homepage: DEFAULT_HOMEPAGE.to_string(),
            search_uri: DEFAULT_SEARCH_URI.to_string(),
            close_native_window_on_close: true,
        }
    }
}
