use serde::{Deserialize, Serialize};

/// Graphics renderer reported by the host. Values follow the host's
/// renderer enumeration; anything not listed is carried as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Renderer {
    Direct3D11,
    Null,
    OpenGlEs30,
    Metal,
    OpenGlCore,
    Direct3D12,
    Vulkan,
    Other(i32),
}

impl Renderer {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            2 => Self::Direct3D11,
            4 => Self::Null,
            11 => Self::OpenGlEs30,
            16 => Self::Metal,
            17 => Self::OpenGlCore,
            18 => Self::Direct3D12,
            21 => Self::Vulkan,
            other => Self::Other(other),
        }
    }
}

/// Backend a window variant is bound to. Fixed for the process once the
/// graphics device is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphicsBackend {
    OpenGlCore,
    Direct3D11,
    /// Recognized but never implemented; its windows fail every operation.
    Metal,
}

impl GraphicsBackend {
    /// Backend for a renderer, or `None` if the renderer is unsupported.
    pub fn for_renderer(renderer: Renderer) -> Option<Self> {
        match renderer {
            Renderer::OpenGlCore => Some(Self::OpenGlCore),
            Renderer::Direct3D11 => Some(Self::Direct3D11),
            Renderer::Metal => Some(Self::Metal),
            _ => None,
        }
    }
}

/// Graphics device notifications delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    Initialize,
    Shutdown,
    BeforeReset,
    AfterReset,
}

impl DeviceEvent {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Initialize),
            1 => Some(Self::Shutdown),
            2 => Some(Self::BeforeReset),
            3 => Some(Self::AfterReset),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_from_raw() {
        assert_eq!(Renderer::from_raw(2), Renderer::Direct3D11);
        assert_eq!(Renderer::from_raw(17), Renderer::OpenGlCore);
        assert_eq!(Renderer::from_raw(16), Renderer::Metal);
        assert_eq!(Renderer::from_raw(4), Renderer::Null);
        assert_eq!(Renderer::from_raw(99), Renderer::Other(99));
    }

    #[test]
    fn backend_for_renderer() {
        assert_eq!(
            GraphicsBackend::for_renderer(Renderer::OpenGlCore),
            Some(GraphicsBackend::OpenGlCore)
        );
        assert_eq!(
            GraphicsBackend::for_renderer(Renderer::Direct3D11),
            Some(GraphicsBackend::Direct3D11)
        );
        assert_eq!(
            GraphicsBackend::for_renderer(Renderer::Metal),
            Some(GraphicsBackend::Metal)
        );
        assert_eq!(GraphicsBackend::for_renderer(Renderer::Vulkan), None);
        assert_eq!(GraphicsBackend::for_renderer(Renderer::Null), None);
    }

    #[test]
    fn device_event_from_raw() {
        assert_eq!(DeviceEvent::from_raw(0), Some(DeviceEvent::Initialize));
        assert_eq!(DeviceEvent::from_raw(1), Some(DeviceEvent::Shutdown));
        assert_eq!(DeviceEvent::from_raw(2), Some(DeviceEvent::BeforeReset));
        assert_eq!(DeviceEvent::from_raw(3), Some(DeviceEvent::AfterReset));
        assert_eq!(DeviceEvent::from_raw(4), None);
    }
}
