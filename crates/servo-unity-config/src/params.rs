//! Runtime parameter store.
//!
//! A small fixed set of keys the host can read and override through the
//! `setParam*`/`getParam*` entry points. Initial values come from the
//! `[browser]` config section. Unknown keys are a silent no-op on set and
//! return the type's default on get.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::schema::BrowserConfig;

/// Recognized parameter keys, with their host wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ParamKey {
    CloseNativeWindowOnClose = 0,
    SearchUri = 1,
    Homepage = 2,
}

impl ParamKey {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::CloseNativeWindowOnClose),
            1 => Some(Self::SearchUri),
            2 => Some(Self::Homepage),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct ParamValues {
    close_native_window_on_close: bool,
    search_uri: String,
    homepage: String,
}

impl From<&BrowserConfig> for ParamValues {
    fn from(browser: &BrowserConfig) -> Self {
        Self {
            close_native_window_on_close: browser.close_native_window_on_close,
            search_uri: browser.search_uri.clone(),
            homepage: browser.homepage.clone(),
        }
    }
}

/// Process-wide parameter values, safe to read from any thread.
#[derive(Debug)]
pub struct ParamStore {
    values: RwLock<ParamValues>,
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::from_config(&BrowserConfig::default())
    }
}

impl ParamStore {
    pub fn from_config(browser: &BrowserConfig) -> Self {
        Self {
            values: RwLock::new(ParamValues::from(browser)),
        }
    }

    /// Replace every value with the ones from a freshly loaded config.
    pub fn reseed(&self, browser: &BrowserConfig) {
        *self.write() = ParamValues::from(browser);
    }

    pub fn get_bool(&self, key: i32) -> bool {
        match ParamKey::from_raw(key) {
            Some(ParamKey::CloseNativeWindowOnClose) => self.read().close_native_window_on_close,
            _ => false,
        }
    }

    pub fn set_bool(&self, key: i32, value: bool) {
        if let Some(ParamKey::CloseNativeWindowOnClose) = ParamKey::from_raw(key) {
            self.write().close_native_window_on_close = value;
        }
    }

    // No integer or float keys exist yet.
    pub fn get_int(&self, _key: i32) -> i32 {
        0
    }

    pub fn set_int(&self, _key: i32, _value: i32) {}

    pub fn get_float(&self, _key: i32) -> f32 {
        0.0
    }

    pub fn set_float(&self, _key: i32, _value: f32) {}

    /// Returns `None` for keys that carry no string value.
    pub fn get_string(&self, key: i32) -> Option<String> {
        match ParamKey::from_raw(key)? {
            ParamKey::SearchUri => Some(self.read().search_uri.clone()),
            ParamKey::Homepage => Some(self.read().homepage.clone()),
            ParamKey::CloseNativeWindowOnClose => None,
        }
    }

    pub fn set_string(&self, key: i32, value: &str) {
        match ParamKey::from_raw(key) {
            Some(ParamKey::SearchUri) => self.write().search_uri = value.to_string(),
            Some(ParamKey::Homepage) => self.write().homepage = value.to_string(),
            _ => {}
        }
    }

    pub fn close_native_window_on_close(&self) -> bool {
        self.read().close_native_window_on_close
    }

    pub fn search_uri(&self) -> String {
        self.read().search_uri.clone()
    }

    pub fn homepage(&self) -> String {
        self.read().homepage.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, ParamValues> {
        self.values.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ParamValues> {
        self.values.write().unwrap_or_else(|e| e.into_inner())
    }
}
