use std::sync::{Arc, Mutex, MutexGuard};

use servo_unity_common::{
    GraphicsBackend, Size, TextureFormat, WindowError, WindowId, WindowState,
};
use tracing::{debug, error, info, warn};

use super::{BrowserWindow, WindowCallbacks};
use crate::session::Session;

/// Platform GL context and device handles, as raw pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SavedContext {
    pub context: usize,
    pub device: usize,
}

/// Access to the render thread's current GL context.
pub trait GlContext: Send + Sync {
    fn current(&self) -> SavedContext;
    fn make_current(&self, saved: SavedContext);
}

/// Captures the current context on creation and puts it back on
/// [`ContextGuard::restore`] and again on drop.
pub struct ContextGuard<'a> {
    gl: &'a dyn GlContext,
    saved: SavedContext,
}

impl<'a> ContextGuard<'a> {
    pub fn capture(gl: &'a dyn GlContext) -> Self {
        Self {
            saved: gl.current(),
            gl,
        }
    }

    pub fn saved(&self) -> SavedContext {
        self.saved
    }

    pub fn restore(&self) {
        self.gl.make_current(self.saved);
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.restore();
    }
}

struct GlSurface {
    size: Size,
    /// GL texture name. Zero until the host binds one.
    texture: u32,
    staging: Vec<u8>,
}

/// Host sizes are unchecked, so the buffer is reserved fallibly.
fn staging_for(size: Size) -> Result<Vec<u8>, WindowError> {
    let unavailable = |e: &dyn std::fmt::Display| {
        WindowError::ResourceUnavailable(format!("staging buffer for {size}: {e}"))
    };
    let len = usize::try_from(GlWindow::FORMAT.buffer_size(size)).map_err(|e| unavailable(&e))?;
    let mut staging = Vec::new();
    staging.try_reserve_exact(len).map_err(|e| unavailable(&e))?;
    staging.resize(len, 0);
    Ok(staging)
}

/// Window for the OpenGL core backend. The engine shares the render
/// thread's GL context and blits straight into the host texture.
pub struct GlWindow {
    session: Session,
    gl: Arc<dyn GlContext>,
    surface: Mutex<GlSurface>,
}

impl GlWindow {
    pub const FORMAT: TextureFormat = TextureFormat::Bgra32;

    pub fn new(session: Session, size: Size, gl: Arc<dyn GlContext>) -> Self {
        Self {
            session,
            gl,
            surface: Mutex::new(GlSurface {
                size,
                texture: 0,
                staging: Vec::new(),
            }),
        }
    }

    fn surface(&self) -> MutexGuard<'_, GlSurface> {
        self.surface.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Bytes held by the CPU staging buffer.
    pub fn staging_len(&self) -> usize {
        self.surface().staging.len()
    }
}

impl BrowserWindow for GlWindow {
    fn id(&self) -> WindowId {
        self.session.window()
    }

    fn uid_ext(&self) -> i32 {
        self.session.uid_ext()
    }

    fn backend(&self) -> GraphicsBackend {
        GraphicsBackend::OpenGlCore
    }

    fn init(&self, callbacks: WindowCallbacks) -> Result<(), WindowError> {
        self.session.set_state(WindowState::Initializing);
        self.session.set_callbacks(callbacks.clone());

        let size = self.size();
        match staging_for(size) {
            Ok(staging) => self.surface().staging = staging,
            Err(e) => {
                error!(window = %self.id(), "gl window init failed: {e}");
                self.session.set_state(WindowState::Failed);
                return Err(e);
            }
        }
        self.session.set_state(WindowState::Ready);
        info!(window = %self.id(), ext = self.uid_ext(), %size, "gl window ready");
        callbacks.notify_created(self.uid_ext(), self.id(), size, Self::FORMAT);
        Ok(())
    }

    fn size(&self) -> Size {
        self.surface().size
    }

    fn set_size(&self, size: Size) -> Result<Size, WindowError> {
        if self.session.state() == WindowState::TornDown {
            return Err(WindowError::TornDown(self.id()));
        }
        let staging = staging_for(size)?;
        {
            let mut surface = self.surface();
            surface.size = size;
            surface.staging = staging;
        }
        debug!(window = %self.id(), %size, "gl window resized");
        self.session.resize_engine(size);
        self.session.callbacks().notify_resized(self.uid_ext(), size);
        Ok(size)
    }

    fn format(&self) -> TextureFormat {
        Self::FORMAT
    }

    fn set_native_ptr(&self, ptr: usize) {
        // GL texture names are 32-bit.
        self.surface().texture = ptr as u32;
    }

    fn native_ptr(&self) -> usize {
        self.surface().texture as usize
    }

    fn request_update(&self, _time_delta: f32) {
        match self.session.state() {
            WindowState::Ready => {}
            WindowState::TornDown => {
                warn!(window = %self.id(), "update requested after teardown");
                return;
            }
            state => {
                debug!(window = %self.id(), ?state, "window not ready, update skipped");
                return;
            }
        }

        let context = ContextGuard::capture(self.gl.as_ref());
        let size = self.size();
        if !self.session.ensure_engine(GraphicsBackend::OpenGlCore, size) {
            return;
        }

        self.session.set_state(WindowState::Updating);
        self.session.pump();
        context.restore();

        let texture = self.surface().texture;
        if texture != 0 {
            self.session.with_engine(|engine| engine.fill_gl_texture(texture, size));
        }
        self.session.set_state(WindowState::Ready);
    }

    fn session(&self) -> Option<&Session> {
        Some(&self.session)
    }
}
