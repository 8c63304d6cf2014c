//! Live window collection and the host-facing window operations.
//!
//! The registry owns every window, keyed by [`WindowId`]. The map lock is
//! held only to insert, remove or clone out a window handle; window calls
//! run without it, so host callbacks fired from inside a window (e.g.
//! `created` calling back into `set_window_texture`) can re-enter.

mod handlers;
mod lifecycle;


use std::collections::BTreeMap;
use std::sync::atomic::AtomicU32;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use servo_unity_common::WindowId;
use servo_unity_config::{EngineConfig, ParamStore};
use tracing::warn;

use crate::device::DeviceLifecycle;
use crate::session::SessionContext;
use crate::window::{BrowserWindow, WindowCallbacks};

pub use handlers::TextureInfo;

pub struct WindowRegistry {
    windows: Mutex<BTreeMap<WindowId, Arc<dyn BrowserWindow>>>,
    /// Closed windows whose engine still runs. Torn down on the render thread.
    retired: Mutex<Vec<Arc<dyn BrowserWindow>>>,
    next_id: AtomicU32,
    callbacks: RwLock<WindowCallbacks>,
    device: Arc<DeviceLifecycle>,
    context: RwLock<SessionContext>,
}

impl WindowRegistry {
    pub fn new(context: SessionContext, device: Arc<DeviceLifecycle>) -> Self {
        Self {
            windows: Mutex::new(BTreeMap::new()),
            retired: Mutex::new(Vec::new()),
            next_id: AtomicU32::new(1),
            callbacks: RwLock::new(WindowCallbacks::default()),
            device,
            context: RwLock::new(context),
        }
    }

    /// Host callbacks handed to windows created from now on.
    pub fn set_callbacks(&self, callbacks: WindowCallbacks) {
        *self.callbacks.write().unwrap_or_else(|e| e.into_inner()) = callbacks;
    }

    pub fn callbacks(&self) -> WindowCallbacks {
        self.callbacks.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Engine settings for windows created from now on.
    pub fn set_engine_config(&self, engine: EngineConfig) {
        self.context.write().unwrap_or_else(|e| e.into_inner()).engine = engine;
    }

    pub fn context(&self) -> SessionContext {
        self.context.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn params(&self) -> Arc<ParamStore> {
        Arc::clone(&self.context.read().unwrap_or_else(|e| e.into_inner()).params)
    }

    pub fn device(&self) -> &DeviceLifecycle {
        &self.device
    }

    pub fn window_count(&self) -> usize {
        self.lock().len()
    }

    pub fn window_ids(&self) -> Vec<WindowId> {
        self.lock().keys().copied().collect()
    }

    pub fn get(&self, id: WindowId) -> Option<Arc<dyn BrowserWindow>> {
        self.lock().get(&id).cloned()
    }

    /// Like [`WindowRegistry::get`], warning when `id` is unknown.
    fn lookup(&self, id: WindowId, operation: &'static str) -> Option<Arc<dyn BrowserWindow>> {
        let window = self.get(id);
        if window.is_none() {
            warn!(window = %id, operation, "no such window");
        }
        window
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<WindowId, Arc<dyn BrowserWindow>>> {
        self.windows.lock().unwrap_or_else(|e| e.into_inner())
    }
}
