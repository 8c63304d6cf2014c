//! Process-wide plugin state.
//!
//! Everything the C entry points touch hangs off one lazily built
//! [`Plugin`]. Building it also installs the tracing subscriber and the
//! panic hook, so the first entry point the host calls sets up logging.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, RwLock};

use servo_unity_common::{DeviceEvent, Size, TextureFormat};
use servo_unity_config::{load_config, LogLevel, ParamStore, PluginConfig, CONFIG_FILE_NAME};
use servo_unity_platform::{LogCallback, LogSink};
use servo_unity_webview::{
    DeviceLifecycle, DeviceProvider, EngineFactory, EngineSlot, RenderDispatch, SessionContext,
    WindowCallbacks, WindowRegistry,
};
use tracing::{debug, info};

use crate::logging;

pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

static PLUGIN: LazyLock<Plugin> = LazyLock::new(|| {
    let slot = EngineSlot::new();
    let plugin = Plugin::new(engine_factory(&slot), slot);
    logging::init(Arc::clone(&plugin.log), Arc::clone(&plugin.resources));
    info!(version = PLUGIN_VERSION, "servo-unity plugin loaded");
    plugin
});

/// The process-wide plugin instance.
pub fn plugin() -> &'static Plugin {
    &PLUGIN
}

#[cfg(feature = "simpleservo")]
fn engine_factory(slot: &EngineSlot) -> Arc<dyn EngineFactory> {
    Arc::new(crate::simpleservo::SimpleServoFactory::new(slot.clone()))
}

#[cfg(not(feature = "simpleservo"))]
fn engine_factory(_slot: &EngineSlot) -> Arc<dyn EngineFactory> {
    Arc::new(servo_unity_webview::UnavailableEngine)
}

/// Host fullscreen begin hook: pixel size, texture format and projection.
pub type FullscreenBeginCallback = Arc<dyn Fn(Size, TextureFormat, i32) + Send + Sync>;
pub type FullscreenEndCallback = Arc<dyn Fn() + Send + Sync>;

/// Fullscreen hooks the host registers. No engine event invokes them yet;
/// fullscreen changes reach the host as browser events.
#[derive(Clone, Default)]
pub struct FullscreenCallbacks {
    pub begin: Option<FullscreenBeginCallback>,
    pub end: Option<FullscreenEndCallback>,
}

pub struct Plugin {
    log: Arc<LogSink>,
    params: Arc<ParamStore>,
    registry: WindowRegistry,
    dispatch: RenderDispatch,
    resources: Arc<RwLock<Option<PathBuf>>>,
    /// Delivery mode for the next log callback registration.
    same_thread_only: AtomicBool,
    fullscreen: Mutex<FullscreenCallbacks>,
}

impl Plugin {
    pub fn new(factory: Arc<dyn EngineFactory>, slot: EngineSlot) -> Self {
        let log = Arc::new(LogSink::default());
        let params = Arc::new(ParamStore::default());
        let context = SessionContext {
            slot,
            ..SessionContext::new(factory, Arc::clone(&params), Arc::clone(&log))
        };
        let defaults = PluginConfig::default();

        Self {
            log,
            params,
            registry: WindowRegistry::new(context, Arc::new(DeviceLifecycle::new())),
            dispatch: RenderDispatch::new(),
            resources: Arc::new(RwLock::new(None)),
            same_thread_only: AtomicBool::new(defaults.logging.callback_same_thread_only),
            fullscreen: Mutex::new(FullscreenCallbacks::default()),
        }
    }

    pub fn log(&self) -> &LogSink {
        &self.log
    }

    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn dispatch(&self) -> &RenderDispatch {
        &self.dispatch
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Store the host callbacks used for windows created from now on.
    pub fn init(&self, callbacks: WindowCallbacks) {
        self.registry.set_callbacks(callbacks);
        info!(version = PLUGIN_VERSION, "plugin initialized");
    }

    /// Close every window and forget the host callbacks.
    pub fn finalize(&self) {
        let closed = self.registry.window_count();
        self.registry.close_all_windows();
        self.registry.set_callbacks(WindowCallbacks::default());
        *self.fullscreen() = FullscreenCallbacks::default();
        info!(closed, "plugin finalized");
    }

    fn fullscreen(&self) -> MutexGuard<'_, FullscreenCallbacks> {
        self.fullscreen.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn fullscreen_callbacks(&self) -> FullscreenCallbacks {
        self.fullscreen().clone()
    }

    pub fn register_fullscreen_begin(&self, callback: Option<FullscreenBeginCallback>) {
        debug!(installed = callback.is_some(), "fullscreen begin callback registered");
        self.fullscreen().begin = callback;
    }

    pub fn register_fullscreen_end(&self, callback: Option<FullscreenEndCallback>) {
        debug!(installed = callback.is_some(), "fullscreen end callback registered");
        self.fullscreen().end = callback;
    }

    pub fn on_device_event(&self, event: DeviceEvent, provider: &dyn DeviceProvider) {
        self.registry.device().on_event(event, provider);
    }

    /// Run a staged render event on the render thread.
    pub fn render_event(&self, event_id: i32) {
        self.dispatch.dispatch(event_id, &self.registry);
    }

    // =========================================================================
    // RESOURCES & CONFIG
    // =========================================================================

    pub fn resources_path(&self) -> Option<PathBuf> {
        self.resources.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Set or clear (`None` or empty) the resources directory.
    ///
    /// When the directory holds a config file it is loaded and applied:
    /// log level and buffering, engine settings, and the parameter store.
    pub fn set_resources_path(&self, path: Option<&str>) {
        let Some(path) = path.filter(|p| !p.is_empty()) else {
            *self.resources.write().unwrap_or_else(|e| e.into_inner()) = None;
            debug!("resources path cleared");
            return;
        };

        let dir = PathBuf::from(path);
        info!(path = %dir.display(), "resources path set");
        if has_config_file(&dir) {
            self.apply_config(&load_config(&dir));
        }
        *self.resources.write().unwrap_or_else(|e| e.into_inner()) = Some(dir);
    }

    fn apply_config(&self, config: &PluginConfig) {
        self.log.set_level(config.logging.level);
        self.log.set_overflow_capacity(config.logging.overflow_buffer_bytes);
        self.same_thread_only
            .store(config.logging.callback_same_thread_only, Ordering::Relaxed);
        self.params.reseed(&config.browser);
        self.registry.set_engine_config(config.engine.clone());
        debug!(level = ?config.logging.level, "config applied");
    }

    // =========================================================================
    // LOGGING
    // =========================================================================

    /// Install or clear the host log callback. The calling thread becomes
    /// the delivery thread when same-thread-only delivery is configured.
    pub fn register_log_callback(&self, callback: Option<LogCallback>) {
        let same_thread_only = self.same_thread_only.load(Ordering::Relaxed);
        self.log.register(callback, same_thread_only);
    }

    /// Raw host level. Negative values are ignored.
    pub fn set_log_level(&self, raw: i32) {
        if let Some(level) = LogLevel::from_raw(raw) {
            self.log.set_level(level);
        }
    }

    pub fn flush_log(&self) {
        self.log.flush();
    }
}

fn has_config_file(dir: &Path) -> bool {
    dir.join(CONFIG_FILE_NAME).is_file()
}

#[cfg(test)]
mod tests {
    use servo_unity_common::{Renderer, WindowId};
    use servo_unity_webview::{
        D3d11Device, GlContext, SavedContext, UnavailableEngine, RENDER_EVENT_UPDATE,
    };

    use super::*;

    struct NoopGl;

    impl GlContext for NoopGl {
        fn current(&self) -> SavedContext {
            SavedContext::default()
        }
        fn make_current(&self, _saved: SavedContext) {}
    }

    struct GlHost;

    impl DeviceProvider for GlHost {
        fn renderer(&self) -> Renderer {
            Renderer::OpenGlCore
        }
        fn gl_context(&self) -> Option<Arc<dyn GlContext>> {
            Some(Arc::new(NoopGl))
        }
        fn d3d11_device(&self) -> Option<Arc<dyn D3d11Device>> {
            None
        }
    }

    fn plugin() -> Plugin {
        Plugin::new(Arc::new(UnavailableEngine), EngineSlot::new())
    }

    fn gl_plugin() -> Plugin {
        let plugin = plugin();
        plugin.on_device_event(DeviceEvent::Initialize, &GlHost);
        plugin
    }

    #[test]
    fn resources_path_applies_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[logging]\nlevel = \"WARN\"\n\n[browser]\nhomepage = \"https://servo.org/\"\n",
        )
        .unwrap();

        let plugin = plugin();
        plugin.set_resources_path(dir.path().to_str());
        assert_eq!(plugin.resources_path().as_deref(), Some(dir.path()));
        assert_eq!(plugin.log().level(), LogLevel::Warn);
        assert_eq!(plugin.params().homepage(), "https://servo.org/");
    }

    #[test]
    fn resources_path_without_config_keeps_host_settings() {
        let dir = tempfile::tempdir().unwrap();
        let plugin = plugin();
        plugin.set_log_level(3);
        plugin.set_resources_path(dir.path().to_str());
        assert_eq!(plugin.log().level(), LogLevel::Error);
    }

    #[test]
    fn empty_resources_path_clears() {
        let dir = tempfile::tempdir().unwrap();
        let plugin = plugin();
        plugin.set_resources_path(dir.path().to_str());
        plugin.set_resources_path(Some(""));
        assert!(plugin.resources_path().is_none());
        plugin.set_resources_path(dir.path().to_str());
        plugin.set_resources_path(None);
        assert!(plugin.resources_path().is_none());
    }

    #[test]
    fn log_level_ignores_negative() {
        let plugin = plugin();
        plugin.set_log_level(0);
        plugin.set_log_level(-1);
        assert_eq!(plugin.log().level(), LogLevel::Debug);
        plugin.set_log_level(9);
        assert_eq!(plugin.log().level(), LogLevel::Error);
    }

    #[test]
    fn log_callback_receives_lines() {
        let plugin = plugin();
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        plugin.register_log_callback(Some(Arc::new(move |line: &str| {
            sink.lock().unwrap().push(line.to_string())
        })));

        assert!(plugin.log().write(LogLevel::Info, "hello"));
        assert_eq!(*lines.lock().unwrap(), vec!["[info] hello\n".to_string()]);

        plugin.register_log_callback(None);
        assert!(!plugin.log().write(LogLevel::Info, "dropped"));
    }

    #[test]
    fn init_then_finalize_closes_windows() {
        let plugin = gl_plugin();
        let created = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&created);
        plugin.init(WindowCallbacks {
            created: Some(Arc::new(
                move |ext: i32, id: WindowId, size: Size, format: TextureFormat| {
                    seen.lock().unwrap().push((ext, id, size, format))
                },
            )),
            ..WindowCallbacks::default()
        });

        let id = plugin.registry().request_new_window(5, Size::new(64, 32)).unwrap();
        plugin.registry().request_new_window(6, Size::new(64, 32)).unwrap();
        assert_eq!(created.lock().unwrap()[0], (5, id, Size::new(64, 32), TextureFormat::Bgra32));

        plugin.finalize();
        assert_eq!(plugin.registry().window_count(), 0);
    }

    #[test]
    fn fullscreen_callbacks_are_stored_until_finalize() {
        let plugin = plugin();
        plugin.register_fullscreen_begin(Some(Arc::new(|_: Size, _: TextureFormat, _: i32| {})));
        plugin.register_fullscreen_end(Some(Arc::new(|| {})));
        let stored = plugin.fullscreen_callbacks();
        assert!(stored.begin.is_some() && stored.end.is_some());

        plugin.register_fullscreen_end(None);
        assert!(plugin.fullscreen_callbacks().end.is_none());

        plugin.finalize();
        assert!(plugin.fullscreen_callbacks().begin.is_none());
    }

    #[test]
    fn render_event_without_engine_binding_leaves_window_idle() {
        let plugin = gl_plugin();
        let id = plugin.registry().request_new_window(0, Size::new(8, 8)).unwrap();

        plugin.dispatch().stage_update(id.as_raw(), 0.016);
        plugin.render_event(RENDER_EVENT_UPDATE);
        plugin.render_event(RENDER_EVENT_UPDATE);

        let window = plugin.registry().get(id).unwrap();
        assert!(!window.engine_running());
        assert_eq!(plugin.registry().context().slot.active_window(), None);
    }

    #[test]
    fn device_shutdown_clears_backend() {
        let plugin = gl_plugin();
        assert!(plugin.registry().device().backend().is_some());
        plugin.on_device_event(DeviceEvent::Shutdown, &GlHost);
        assert!(plugin.registry().device().backend().is_none());
    }
}
