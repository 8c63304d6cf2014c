//! Graphics device lifecycle.
//!
//! The host reports device initialize/shutdown/reset. On initialize the
//! active backend is picked from the renderer and its device handle is
//! captured; it stays fixed until shutdown.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use servo_unity_common::{DeviceEvent, GraphicsBackend, Renderer};
use tracing::{debug, error, info};

use crate::window::{D3d11Device, GlContext};

/// Device handle for the active backend.
#[derive(Clone)]
pub enum ActiveDevice {
    OpenGlCore(Arc<dyn GlContext>),
    Direct3D11(Arc<dyn D3d11Device>),
    /// Recognized backend whose windows are stubs.
    Unimplemented(GraphicsBackend),
}

impl ActiveDevice {
    pub fn backend(&self) -> GraphicsBackend {
        match self {
            Self::OpenGlCore(_) => GraphicsBackend::OpenGlCore,
            Self::Direct3D11(_) => GraphicsBackend::Direct3D11,
            Self::Unimplemented(backend) => *backend,
        }
    }
}

/// Where device handles come from when the host initializes its device.
pub trait DeviceProvider {
    fn renderer(&self) -> Renderer;
    fn gl_context(&self) -> Option<Arc<dyn GlContext>>;
    fn d3d11_device(&self) -> Option<Arc<dyn D3d11Device>>;
}

#[derive(Default)]
pub struct DeviceLifecycle {
    active: RwLock<Option<ActiveDevice>>,
}

impl DeviceLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_event(&self, event: DeviceEvent, provider: &dyn DeviceProvider) {
        match event {
            DeviceEvent::Initialize => self.initialize(provider),
            DeviceEvent::Shutdown => {
                if let Some(device) = self.write().take() {
                    info!(backend = ?device.backend(), "graphics device shut down");
                }
            }
            // Resources are not recreated across a device reset.
            DeviceEvent::BeforeReset | DeviceEvent::AfterReset => {
                debug!(?event, "graphics device reset");
            }
        }
    }

    fn initialize(&self, provider: &dyn DeviceProvider) {
        let renderer = provider.renderer();
        let Some(backend) = GraphicsBackend::for_renderer(renderer) else {
            error!(?renderer, "unsupported graphics renderer");
            *self.write() = None;
            return;
        };

        let device = match backend {
            GraphicsBackend::OpenGlCore => provider.gl_context().map(ActiveDevice::OpenGlCore),
            GraphicsBackend::Direct3D11 => provider.d3d11_device().map(ActiveDevice::Direct3D11),
            GraphicsBackend::Metal => Some(ActiveDevice::Unimplemented(backend)),
        };

        match device {
            Some(device) => {
                info!(?backend, "graphics device initialized");
                *self.write() = Some(device);
            }
            None => {
                error!(?backend, "graphics device handle unavailable");
                *self.write() = None;
            }
        }
    }

    pub fn backend(&self) -> Option<GraphicsBackend> {
        self.read().as_ref().map(ActiveDevice::backend)
    }

    pub fn active(&self) -> Option<ActiveDevice> {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<ActiveDevice>> {
        self.active.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<ActiveDevice>> {
        self.active.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeProvider;

    #[test]
    fn initialize_records_backend_until_shutdown() {
        let device = DeviceLifecycle::new();
        assert_eq!(device.backend(), None);

        device.on_event(DeviceEvent::Initialize, &FakeProvider::gl());
        assert_eq!(device.backend(), Some(GraphicsBackend::OpenGlCore));

        device.on_event(DeviceEvent::BeforeReset, &FakeProvider::gl());
        device.on_event(DeviceEvent::AfterReset, &FakeProvider::gl());
        assert_eq!(device.backend(), Some(GraphicsBackend::OpenGlCore));

        device.on_event(DeviceEvent::Shutdown, &FakeProvider::gl());
        assert_eq!(device.backend(), None);
    }

    #[test]
    fn unsupported_renderer_leaves_backend_unset() {
        let device = DeviceLifecycle::new();
        device.on_event(DeviceEvent::Initialize, &FakeProvider::with_renderer(Renderer::Null));
        assert!(device.active().is_none());

        device.on_event(DeviceEvent::Initialize, &FakeProvider::with_renderer(Renderer::Vulkan));
        assert!(device.active().is_none());
    }

    #[test]
    fn missing_device_handle_leaves_backend_unset() {
        let device = DeviceLifecycle::new();
        device.on_event(DeviceEvent::Initialize, &FakeProvider::with_renderer(Renderer::Direct3D11));
        assert_eq!(device.backend(), None);
    }

    #[test]
    fn metal_is_recognized_but_unimplemented() {
        let device = DeviceLifecycle::new();
        device.on_event(DeviceEvent::Initialize, &FakeProvider::with_renderer(Renderer::Metal));
        assert!(matches!(
            device.active(),
            Some(ActiveDevice::Unimplemented(GraphicsBackend::Metal))
        ));
    }
}
