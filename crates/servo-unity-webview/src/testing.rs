//! In-process engine double shared by the crate's tests.

use std::sync::{Arc, Mutex};

use servo_unity_common::{EngineError, EngineKey, MouseButton, Renderer, Size};
use servo_unity_config::ParamStore;
use servo_unity_platform::LogSink;

use crate::device::DeviceProvider;
use crate::engine::{Engine, EngineFactory, EngineOptions};
use crate::host::EngineHost;
use crate::session::SessionContext;
use crate::window::{D3d11Device, GlContext, SavedContext};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    PerformUpdates,
    Fill(u32, Size),
    Resize(Size),
    MouseMove(f32, f32),
    MouseDown(f32, f32, MouseButton),
    MouseUp(f32, f32, MouseButton),
    Click(f32, f32),
    Scroll(i32, i32, i32, i32),
    KeyDown(EngineKey),
    KeyUp(EngineKey),
    LoadUri(String),
    Reload,
    Refresh,
    Stop,
    GoBack,
    GoForward,
    Deinit,
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }
}

pub struct RecordingEngine {
    log: CallLog,
}

impl Engine for RecordingEngine {
    fn perform_updates(&mut self) {
        self.log.push(Call::PerformUpdates);
    }
    fn fill_gl_texture(&mut self, texture: u32, size: Size) {
        self.log.push(Call::Fill(texture, size));
    }
    fn resize(&mut self, size: Size) {
        self.log.push(Call::Resize(size));
    }
    fn mouse_move(&mut self, x: f32, y: f32) {
        self.log.push(Call::MouseMove(x, y));
    }
    fn mouse_down(&mut self, x: f32, y: f32, button: MouseButton) {
        self.log.push(Call::MouseDown(x, y, button));
    }
    fn mouse_up(&mut self, x: f32, y: f32, button: MouseButton) {
        self.log.push(Call::MouseUp(x, y, button));
    }
    fn click(&mut self, x: f32, y: f32) {
        self.log.push(Call::Click(x, y));
    }
    fn scroll(&mut self, dx: i32, dy: i32, x: i32, y: i32) {
        self.log.push(Call::Scroll(dx, dy, x, y));
    }
    fn key_down(&mut self, key: EngineKey) {
        self.log.push(Call::KeyDown(key));
    }
    fn key_up(&mut self, key: EngineKey) {
        self.log.push(Call::KeyUp(key));
    }
    fn load_uri(&mut self, uri: &str) -> bool {
        self.log.push(Call::LoadUri(uri.to_string()));
        true
    }
    fn is_uri_valid(&self, uri: &str) -> bool {
        url::Url::parse(uri).is_ok()
    }
    fn reload(&mut self) {
        self.log.push(Call::Reload);
    }
    fn refresh(&mut self) {
        self.log.push(Call::Refresh);
    }
    fn stop(&mut self) {
        self.log.push(Call::Stop);
    }
    fn go_back(&mut self) {
        self.log.push(Call::GoBack);
    }
    fn go_forward(&mut self) {
        self.log.push(Call::GoForward);
    }
    fn deinit(&mut self) {
        self.log.push(Call::Deinit);
    }
}

/// Factory that hands out [`RecordingEngine`]s and remembers every start.
#[derive(Default)]
pub struct RecordingFactory {
    pub log: CallLog,
    pub starts: Mutex<Vec<EngineOptions>>,
    pub hosts: Mutex<Vec<EngineHost>>,
    pub fail: bool,
    pub handle: Option<usize>,
}

impl RecordingFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn with_handle(handle: usize) -> Arc<Self> {
        Arc::new(Self {
            handle: Some(handle),
            ..Self::default()
        })
    }

    pub fn start_count(&self) -> usize {
        self.starts.lock().unwrap().len()
    }

    pub fn last_options(&self) -> Option<EngineOptions> {
        self.starts.lock().unwrap().last().cloned()
    }

    /// Callback target of the most recent start.
    pub fn host(&self) -> EngineHost {
        self.hosts.lock().unwrap().last().cloned().unwrap()
    }
}

impl EngineFactory for RecordingFactory {
    fn start(&self, options: EngineOptions, host: EngineHost) -> Result<Box<dyn Engine>, EngineError> {
        self.starts.lock().unwrap().push(options);
        if self.fail {
            return Err(EngineError::InitFailed("refused by test".into()));
        }
        self.hosts.lock().unwrap().push(host);
        Ok(Box::new(RecordingEngine {
            log: self.log.clone(),
        }))
    }

    fn shared_texture_handle(&self) -> Option<usize> {
        self.handle
    }
}

pub fn context(factory: &Arc<RecordingFactory>) -> SessionContext {
    SessionContext::new(
        Arc::clone(factory) as Arc<dyn EngineFactory>,
        Arc::new(ParamStore::default()),
        Arc::new(LogSink::default()),
    )
}

/// GL context that is always current.
pub struct NullGl;

impl GlContext for NullGl {
    fn current(&self) -> SavedContext {
        SavedContext::default()
    }
    fn make_current(&self, _saved: SavedContext) {}
}

/// Device provider with a fixed renderer. Only the GL handle is offered.
pub struct FakeProvider {
    renderer: Renderer,
}

impl FakeProvider {
    pub fn gl() -> Self {
        Self::with_renderer(Renderer::OpenGlCore)
    }

    pub fn with_renderer(renderer: Renderer) -> Self {
        Self { renderer }
    }
}

impl DeviceProvider for FakeProvider {
    fn renderer(&self) -> Renderer {
        self.renderer
    }
    fn gl_context(&self) -> Option<Arc<dyn GlContext>> {
        Some(Arc::new(NullGl))
    }
    fn d3d11_device(&self) -> Option<Arc<dyn D3d11Device>> {
        None
    }
}
