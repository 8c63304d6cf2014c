//! Per-window engine session.
//!
//! A [`Session`] owns everything a window needs to drive the engine:
//! the task queue, the event queue, the update flags and the engine
//! instance itself once started. Backend windows ([`crate::window`]) wrap
//! a session and add the texture handling for their graphics API.

mod flags;


use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use servo_unity_common::{
    GraphicsBackend, KeyDirection, MouseButton, Size, WindowError, WindowId, WindowState,
};
use servo_unity_config::{EngineConfig, ParamStore};
use servo_unity_platform::{KeyInput, LogSink};
use tracing::{debug, error, info, trace, warn};

use crate::engine::{Engine, EngineFactory, EngineOptions};
use crate::events::EventQueue;
use crate::host::{EngineHost, WindowMetadata};
use crate::navigation;
use crate::slot::EngineSlot;
use crate::tasks::TaskQueue;
use crate::window::WindowCallbacks;

pub use flags::UpdateFlags;

/// Process-wide pieces every session shares.
#[derive(Clone)]
pub struct SessionContext {
    /// Which window currently drives the single engine instance.
    pub slot: EngineSlot,
    /// Starts the engine on a window's first update.
    pub factory: Arc<dyn EngineFactory>,
    /// Runtime params; homepage and search template are read at use time.
    pub params: Arc<ParamStore>,
    /// Engine start options from the config file.
    pub engine: EngineConfig,
    /// Host log sink. Its level also sets the engine's log argument.
    pub log: Arc<LogSink>,
}

impl SessionContext {
    pub fn new(factory: Arc<dyn EngineFactory>, params: Arc<ParamStore>, log: Arc<LogSink>) -> Self {
        Self {
            slot: EngineSlot::new(),
            factory,
            params,
            engine: EngineConfig::default(),
            log,
        }
    }

    pub fn with_engine_config(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

pub struct Session {
    window: WindowId,
    uid_ext: i32,
    ctx: SessionContext,
    tasks: TaskQueue,
    events: Arc<EventQueue>,
    flags: Arc<UpdateFlags>,
    metadata: Arc<Mutex<WindowMetadata>>,
    callbacks: RwLock<WindowCallbacks>,
    engine: Mutex<Option<Box<dyn Engine>>>,
    running: AtomicBool,
    /// Set once the engine refused or failed to start for this window.
    refused: AtomicBool,
    state: Mutex<WindowState>,
}

impl Session {
    pub fn new(window: WindowId, uid_ext: i32, ctx: SessionContext) -> Self {
        Self {
            window,
            uid_ext,
            ctx,
            tasks: TaskQueue::new(),
            events: Arc::new(EventQueue::new()),
            flags: Arc::new(UpdateFlags::default()),
            metadata: Arc::new(Mutex::new(WindowMetadata::default())),
            callbacks: RwLock::new(WindowCallbacks::default()),
            engine: Mutex::new(None),
            running: AtomicBool::new(false),
            refused: AtomicBool::new(false),
            state: Mutex::new(WindowState::Uninitialized),
        }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn uid_ext(&self) -> i32 {
        self.uid_ext
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn state(&self) -> WindowState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_state(&self, next: WindowState) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state != next {
            trace!(window = %self.window, from = ?*state, to = ?next, "window state");
            *state = next;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn set_callbacks(&self, callbacks: WindowCallbacks) {
        *self.callbacks.write().unwrap_or_else(|e| e.into_inner()) = callbacks;
    }

    pub fn callbacks(&self) -> WindowCallbacks {
        self.callbacks.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Callback target handed to the engine for this window.
    pub fn host(&self) -> EngineHost {
        EngineHost::new(
            self.window,
            self.uid_ext,
            Arc::clone(&self.events),
            Arc::clone(&self.flags),
            Arc::clone(&self.metadata),
        )
    }

    pub fn metadata(&self) -> WindowMetadata {
        self.metadata.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn engine_lock(&self) -> MutexGuard<'_, Option<Box<dyn Engine>>> {
        self.engine.lock().unwrap_or_else(|e| e.into_inner())
    }

    // =========================================================================
    // ENGINE LIFECYCLE
    // =========================================================================

    fn options(&self, api: GraphicsBackend, size: Size) -> EngineOptions {
        let config = &self.ctx.engine;
        let mut args = vec![
            "--vslogger-level".to_string(),
            self.ctx.log.level().engine_arg().to_string(),
        ];
        args.extend(config.extra_args.iter().cloned());

        EngineOptions {
            api,
            args,
            url: self.ctx.params.homepage(),
            size,
            density: config.density,
            subpixel_text_antialiasing: config.subpixel_text_antialiasing,
            log_filters: config.log_filters.clone(),
        }
    }

    /// Start the engine for this window if it is not running yet.
    ///
    /// Returns whether the engine is running afterwards. A refusal (another
    /// window owns the engine) or a failed start is remembered, and later
    /// calls return `false` without retrying.
    pub fn ensure_engine(&self, api: GraphicsBackend, size: Size) -> bool {
        if self.is_running() {
            return true;
        }
        if self.refused.load(Ordering::Acquire) {
            return false;
        }

        let host = self.host();
        if let Err(e) = self.ctx.slot.try_activate(host.clone()) {
            error!(window = %self.window, "{e}");
            self.refused.store(true, Ordering::Release);
            return false;
        }

        let options = self.options(api, size);
        info!(
            window = %self.window,
            ?api,
            %size,
            url = %options.url,
            args = %options.joined_args(),
            "starting engine"
        );

        match self.ctx.factory.start(options, host) {
            Ok(engine) => {
                *self.engine_lock() = Some(engine);
                self.running.store(true, Ordering::Release);
                true
            }
            Err(source) => {
                self.ctx.slot.release(self.window);
                let err = WindowError::EngineStart {
                    window: self.window,
                    source,
                };
                error!("{err}");
                self.refused.store(true, Ordering::Release);
                false
            }
        }
    }

    /// Let the engine update if it asked to, then run queued tasks.
    /// Returns `false` when no engine is running.
    pub fn pump(&self) -> bool {
        let mut guard = self.engine_lock();
        let Some(engine) = guard.as_mut() else {
            return false;
        };

        if self.flags.take() {
            engine.perform_updates();
        }
        let ran = self.tasks.drain_into(engine.as_mut());
        if ran > 0 {
            debug!(window = %self.window, ran, "ran engine tasks");
        }
        true
    }

    /// Run `f` against the running engine, if any.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut dyn Engine) -> R) -> Option<R> {
        let mut guard = self.engine_lock();
        guard.as_mut().map(|engine| f(engine.as_mut()))
    }

    /// Queue `task` for the next render tick. Dropped when no engine runs.
    pub fn enqueue(&self, what: &'static str, task: impl FnOnce(&mut dyn Engine) + Send + 'static) {
        if !self.is_running() {
            debug!(window = %self.window, what, "engine not running, input dropped");
            return;
        }
        self.tasks.push(Box::new(task));
    }

    /// Stop the engine and free the engine slot. Pending tasks are dropped.
    /// Returns whether there was anything to tear down.
    pub fn teardown(&self) -> bool {
        if !self.running.swap(false, Ordering::AcqRel) {
            return false;
        }

        let dropped = self.tasks.clear();
        let engine = self.engine_lock().take();
        if let Some(mut engine) = engine {
            engine.deinit();
        }
        self.ctx.slot.release(self.window);
        self.flags.clear();
        self.set_state(WindowState::TornDown);
        info!(window = %self.window, dropped, "engine torn down");
        true
    }

    /// Deliver queued browser events to the host, in order.
    pub fn service_events(&self) -> usize {
        let callback = self.callbacks().browser_event;
        self.events.drain_with(|pending| {
            if let Some(callback) = &callback {
                callback(pending.uid_ext, pending.event);
            }
        })
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    pub fn pointer_enter(&self) {
        debug!(window = %self.window, "pointer entered");
    }

    pub fn pointer_exit(&self) {
        debug!(window = %self.window, "pointer exited");
    }

    pub fn pointer_over(&self, x: i32, y: i32) {
        self.enqueue("mouse_move", move |e| e.mouse_move(x as f32, y as f32));
    }

    pub fn pointer_press(&self, button: MouseButton, x: i32, y: i32) {
        self.enqueue("mouse_down", move |e| e.mouse_down(x as f32, y as f32, button));
    }

    pub fn pointer_release(&self, button: MouseButton, x: i32, y: i32) {
        self.enqueue("mouse_up", move |e| e.mouse_up(x as f32, y as f32, button));
    }

    /// The engine only understands primary-button clicks.
    pub fn pointer_click(&self, button: MouseButton, x: i32, y: i32) {
        if button != MouseButton::Left {
            debug!(window = %self.window, ?button, "ignoring non-primary click");
            return;
        }
        self.enqueue("click", move |e| e.click(x as f32, y as f32));
    }

    pub fn pointer_scroll(&self, dx: i32, dy: i32, x: i32, y: i32) {
        self.enqueue("scroll", move |e| e.scroll(dx, dy, x, y));
    }

    pub fn key(&self, input: KeyInput) {
        let KeyInput { direction, key } = input;
        match direction {
            KeyDirection::Down => self.enqueue("key_down", move |e| e.key_down(key)),
            KeyDirection::Up => self.enqueue("key_up", move |e| e.key_up(key)),
        }
    }

    pub fn resize_engine(&self, size: Size) {
        self.enqueue("resize", move |e| e.resize(size));
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    pub fn refresh(&self) {
        self.enqueue("refresh", |e| e.refresh());
    }

    pub fn reload(&self) {
        self.enqueue("reload", |e| e.reload());
    }

    pub fn stop(&self) {
        self.enqueue("stop", |e| e.stop());
    }

    pub fn go_back(&self) {
        self.enqueue("go_back", |e| e.go_back());
    }

    pub fn go_forward(&self) {
        self.enqueue("go_forward", |e| e.go_forward());
    }

    pub fn go_home(&self) {
        let home = self.ctx.params.homepage();
        let window = self.window;
        self.enqueue("go_home", move |e| {
            if !e.load_uri(&home) {
                warn!(%window, uri = %home, "engine rejected homepage");
            }
        });
    }

    /// Load `input`, resolving it to a URI or a search first.
    pub fn navigate(&self, input: &str) {
        let input = input.to_string();
        let template = self.ctx.params.search_uri();
        let window = self.window;
        self.enqueue("navigate", move |e| {
            let Some(uri) = navigation::resolve(&input, &template, |u| e.is_uri_valid(u)) else {
                return;
            };
            info!(%window, uri = %uri, "navigating");
            if !e.load_uri(&uri) {
                warn!(%window, uri = %uri, "engine rejected uri");
            }
        });
    }
}

/// Dropping never calls into the engine: drop can run on any thread, and
/// the engine may only be stopped on the render thread. A running engine
/// keeps the slot until the process ends; the registry avoids this by
/// parking closed windows until a render-thread call tears them down.
impl Drop for Session {
    fn drop(&mut self) {
        if self.is_running() {
            error!(
                window = %self.window,
                pending = self.tasks.clear(),
                "session dropped with engine running, cleanupRenderer was never called"
            );
        }
    }
}
