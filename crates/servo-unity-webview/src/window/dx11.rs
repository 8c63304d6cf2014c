use std::sync::{Arc, Mutex, MutexGuard};

use servo_unity_common::{
    GraphicsBackend, Size, TextureFormat, WindowError, WindowId, WindowState,
};
use tracing::{debug, error, info, warn};

use super::{BrowserWindow, WindowCallbacks};
use crate::session::Session;

/// Engine-side texture opened from a shared handle.
pub trait SharedTexture: Send + Sync {
    fn size(&self) -> Size;
    /// Raw `DXGI_FORMAT` value from the texture description.
    fn dxgi_format(&self) -> u32;
    fn as_raw(&self) -> usize;
}

/// The host's D3D11 device, as far as windows need it.
pub trait D3d11Device: Send + Sync {
    fn open_shared_texture(&self, handle: usize) -> Result<Box<dyn SharedTexture>, WindowError>;

    /// Size of a host texture, `None` if it cannot be described.
    fn texture_size(&self, texture: usize) -> Option<Size>;

    /// Copy `src` into the host texture `dst` on the immediate context.
    fn copy_resource(&self, dst: usize, src: &dyn SharedTexture);
}

/// Map a `DXGI_FORMAT` to the host texture format.
pub fn format_for_dxgi(format: u32) -> TextureFormat {
    match format {
        // R8G8B8A8 typeless, unorm, unorm_srgb, uint
        27..=30 => TextureFormat::Rgba32,
        // B8G8R8A8 unorm, typeless, unorm_srgb
        87 | 90 | 91 => TextureFormat::Bgra32,
        85 => TextureFormat::Rgb565,
        86 => TextureFormat::Rgba5551,
        115 => TextureFormat::Rgba4444,
        _ => TextureFormat::Invalid,
    }
}

struct DxSurface {
    size: Size,
    format: TextureFormat,
    host_texture: usize,
    shared: Option<Box<dyn SharedTexture>>,
}

/// Window for the Direct3D 11 backend. The engine renders into a shared
/// texture which is copied into the host texture every tick.
pub struct D3d11Window {
    session: Session,
    device: Arc<dyn D3d11Device>,
    surface: Mutex<DxSurface>,
}

impl D3d11Window {
    pub fn new(session: Session, size: Size, device: Arc<dyn D3d11Device>) -> Self {
        Self {
            session,
            device,
            surface: Mutex::new(DxSurface {
                size,
                format: TextureFormat::Invalid,
                host_texture: 0,
                shared: None,
            }),
        }
    }

    fn surface(&self) -> MutexGuard<'_, DxSurface> {
        self.surface.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn open_shared(&self) -> Result<Box<dyn SharedTexture>, WindowError> {
        let handle = self
            .session
            .context()
            .factory
            .shared_texture_handle()
            .ok_or_else(|| WindowError::ResourceUnavailable("engine shared texture handle".into()))?;
        self.device.open_shared_texture(handle)
    }
}

impl BrowserWindow for D3d11Window {
    fn id(&self) -> WindowId {
        self.session.window()
    }

    fn uid_ext(&self) -> i32 {
        self.session.uid_ext()
    }

    fn backend(&self) -> GraphicsBackend {
        GraphicsBackend::Direct3D11
    }

    fn init(&self, callbacks: WindowCallbacks) -> Result<(), WindowError> {
        self.session.set_state(WindowState::Initializing);
        self.session.set_callbacks(callbacks.clone());

        let shared = match self.open_shared() {
            Ok(shared) => shared,
            Err(e) => {
                error!(window = %self.id(), "d3d11 window init failed: {e}");
                self.session.set_state(WindowState::Failed);
                return Err(e);
            }
        };

        let size = shared.size();
        let format = format_for_dxgi(shared.dxgi_format());
        {
            let mut surface = self.surface();
            surface.size = size;
            surface.format = format;
            surface.shared = Some(shared);
        }

        self.session.set_state(WindowState::Ready);
        info!(window = %self.id(), ext = self.uid_ext(), %size, ?format, "d3d11 window ready");
        callbacks.notify_created(self.uid_ext(), self.id(), size, format);
        Ok(())
    }

    fn size(&self) -> Size {
        self.surface().size
    }

    /// The shared texture cannot be resized from here, so the current size
    /// is kept and reported back.
    fn set_size(&self, size: Size) -> Result<Size, WindowError> {
        if self.session.state() == WindowState::TornDown {
            return Err(WindowError::TornDown(self.id()));
        }
        let actual = self.size();
        if actual != size {
            debug!(window = %self.id(), requested = %size, %actual, "d3d11 window keeps its size");
        }
        self.session.callbacks().notify_resized(self.uid_ext(), actual);
        Ok(actual)
    }

    fn format(&self) -> TextureFormat {
        self.surface().format
    }

    fn set_native_ptr(&self, ptr: usize) {
        self.surface().host_texture = ptr;
    }

    fn native_ptr(&self) -> usize {
        self.surface().host_texture
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

        if !self.session.ensure_engine(GraphicsBackend::Direct3D11, self.size()) {
            return;
        }
        self.session.set_state(WindowState::Updating);
        self.session.pump();

        let surface = self.surface();
        if let (Some(shared), true) = (surface.shared.as_deref(), surface.host_texture != 0) {
            match self.device.texture_size(surface.host_texture) {
                Some(host) if host == shared.size() => {
                    self.device.copy_resource(surface.host_texture, shared)
                }
                Some(host) => error!(
                    window = %self.id(),
                    %host,
                    engine = %shared.size(),
                    "host texture size does not match engine texture"
                ),
                None => warn!(window = %self.id(), "host texture could not be described"),
            }
        }
        drop(surface);
        self.session.set_state(WindowState::Ready);
    }

    fn session(&self) -> Option<&Session> {
        Some(&self.session)
    }
}
