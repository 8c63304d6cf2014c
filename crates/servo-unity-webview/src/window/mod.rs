//! Browser-backed render targets.
//!
//! [`BrowserWindow`] is the uniform per-window interface the registry talks
//! to. One implementation exists per graphics backend:
//!
//! - [`GlWindow`]: OpenGL core, the engine blits into the host's GL texture
//! - [`D3d11Window`]: Direct3D 11, copies from a shared engine texture
//! - [`StubWindow`]: recognized but unimplemented backends
//!
//! Input and navigation calls are turned into engine tasks by the window's
//! [`Session`] and run on the next render tick.

mod dx11;
mod gl;
mod stub;

use std::sync::Arc;

use servo_unity_common::{
    BrowserEvent, GraphicsBackend, MouseButton, Size, TextureFormat, WindowError, WindowId,
    WindowState,
};
use servo_unity_platform::KeyInput;
use tracing::debug;

use crate::host::WindowMetadata;
use crate::session::Session;

pub use dx11::{format_for_dxgi, D3d11Device, D3d11Window, SharedTexture};
pub use gl::{ContextGuard, GlContext, GlWindow, SavedContext};
pub use stub::StubWindow;

pub type CreatedCallback = Arc<dyn Fn(i32, WindowId, Size, TextureFormat) + Send + Sync>;
pub type ResizedCallback = Arc<dyn Fn(i32, Size) + Send + Sync>;
pub type BrowserEventCallback = Arc<dyn Fn(i32, BrowserEvent) + Send + Sync>;

/// Host callbacks registered at plugin init. All optional.
#[derive(Clone, Default)]
pub struct WindowCallbacks {
    pub created: Option<CreatedCallback>,
    pub resized: Option<ResizedCallback>,
    pub browser_event: Option<BrowserEventCallback>,
}

impl WindowCallbacks {
    pub fn notify_created(&self, uid_ext: i32, window: WindowId, size: Size, format: TextureFormat) {
        if let Some(created) = &self.created {
            created(uid_ext, window, size, format);
        }
    }

    pub fn notify_resized(&self, uid_ext: i32, size: Size) {
        if let Some(resized) = &self.resized {
            resized(uid_ext, size);
        }
    }
}

/// One embedded-browser render surface.
///
/// `request_update` and `cleanup_renderer` are called on the host render
/// thread only, with the host graphics context current. Everything else
/// may be called from the host main thread.
pub trait BrowserWindow: Send + Sync {
    fn id(&self) -> WindowId;
    fn uid_ext(&self) -> i32;
    fn backend(&self) -> GraphicsBackend;

    /// Establish format and size, then report them through
    /// `callbacks.created` exactly once before returning `Ok`.
    fn init(&self, callbacks: WindowCallbacks) -> Result<(), WindowError>;

    fn size(&self) -> Size;

    /// Resize the render target. Returns the size actually applied, which
    /// is also reported through the resized callback.
    fn set_size(&self, size: Size) -> Result<Size, WindowError>;

    fn format(&self) -> TextureFormat;

    /// Bind the host-owned texture. Not validated.
    fn set_native_ptr(&self, ptr: usize);
    fn native_ptr(&self) -> usize;

    /// Render tick: start the engine if needed, run queued work and
    /// refresh the host texture.
    fn request_update(&self, time_delta: f32);

    /// `None` for backends that never drive the engine.
    fn session(&self) -> Option<&Session>;

    fn state(&self) -> WindowState {
        self.session().map_or(WindowState::Failed, Session::state)
    }

    fn engine_running(&self) -> bool {
        self.session().is_some_and(Session::is_running)
    }

    /// Stop the engine and drop pending tasks. No-op when not running.
    fn cleanup_renderer(&self) {
        if let Some(session) = self.session() {
            session.teardown();
        }
    }

    /// Deliver queued browser events to the host. Returns how many.
    fn service_window_events(&self) -> usize {
        self.session().map_or(0, Session::service_events)
    }

    fn metadata(&self) -> WindowMetadata {
        self.session().map(Session::metadata).unwrap_or_default()
    }

    /// Ask the engine's own native window, if any, to close.
    fn close_native_window(&self) {
        debug!(window = %self.id(), "native window close requested, nothing to close");
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    fn pointer_enter(&self) {
        if let Some(session) = self.session() {
            session.pointer_enter();
        }
    }

    fn pointer_exit(&self) {
        if let Some(session) = self.session() {
            session.pointer_exit();
        }
    }

    fn pointer_over(&self, x: i32, y: i32) {
        if let Some(session) = self.session() {
            session.pointer_over(x, y);
        }
    }

    fn pointer_press(&self, button: MouseButton, x: i32, y: i32) {
        if let Some(session) = self.session() {
            session.pointer_press(button, x, y);
        }
    }

    fn pointer_release(&self, button: MouseButton, x: i32, y: i32) {
        if let Some(session) = self.session() {
            session.pointer_release(button, x, y);
        }
    }

    fn pointer_click(&self, button: MouseButton, x: i32, y: i32) {
        if let Some(session) = self.session() {
            session.pointer_click(button, x, y);
        }
    }

    fn pointer_scroll_discrete(&self, dx: i32, dy: i32, x: i32, y: i32) {
        if let Some(session) = self.session() {
            session.pointer_scroll(dx, dy, x, y);
        }
    }

    fn key_event(&self, input: KeyInput) {
        if let Some(session) = self.session() {
            session.key(input);
        }
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    fn refresh(&self) {
        if let Some(session) = self.session() {
            session.refresh();
        }
    }

    fn reload(&self) {
        if let Some(session) = self.session() {
            session.reload();
        }
    }

    fn stop(&self) {
        if let Some(session) = self.session() {
            session.stop();
        }
    }

    fn go_back(&self) {
        if let Some(session) = self.session() {
            session.go_back();
        }
    }

    fn go_forward(&self) {
        if let Some(session) = self.session() {
            session.go_forward();
        }
    }

    fn go_home(&self) {
        if let Some(session) = self.session() {
            session.go_home();
        }
    }

    fn navigate(&self, input: &str) {
        if let Some(session) = self.session() {
            session.navigate(input);
        }
    }
}
