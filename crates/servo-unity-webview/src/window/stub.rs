use std::sync::atomic::{AtomicUsize, Ordering};

use servo_unity_common::{GraphicsBackend, Size, TextureFormat, WindowError, WindowId};
use tracing::warn;

use super::{BrowserWindow, WindowCallbacks};
use crate::session::Session;

/// Window for a backend that is recognized but not implemented. Init
/// fails, so the registry never keeps one; every other call does nothing.
pub struct StubWindow {
    id: WindowId,
    uid_ext: i32,
    backend: GraphicsBackend,
    native: AtomicUsize,
}

impl StubWindow {
    pub fn new(id: WindowId, uid_ext: i32, backend: GraphicsBackend) -> Self {
        Self {
            id,
            uid_ext,
            backend,
            native: AtomicUsize::new(0),
        }
    }

    fn unsupported(&self) -> WindowError {
        WindowError::Unsupported(format!("{:?} windows are not implemented", self.backend))
    }
}

impl BrowserWindow for StubWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn uid_ext(&self) -> i32 {
        self.uid_ext
    }

    fn backend(&self) -> GraphicsBackend {
        self.backend
    }

    fn init(&self, _callbacks: WindowCallbacks) -> Result<(), WindowError> {
        Err(self.unsupported())
    }

    fn size(&self) -> Size {
        Size::default()
    }

    fn set_size(&self, _size: Size) -> Result<Size, WindowError> {
        Err(self.unsupported())
    }

    fn format(&self) -> TextureFormat {
        TextureFormat::Invalid
    }

    fn set_native_ptr(&self, ptr: usize) {
        self.native.store(ptr, Ordering::Relaxed);
    }

    fn native_ptr(&self) -> usize {
        self.native.load(Ordering::Relaxed)
    }

    fn request_update(&self, _time_delta: f32) {
        warn!(window = %self.id, backend = ?self.backend, "update on unimplemented backend");
    }

    fn session(&self) -> Option<&Session> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use servo_unity_common::WindowState;

    #[test]
    fn every_operation_fails_or_does_nothing() {
        let stub = StubWindow::new(WindowId(1), 0, GraphicsBackend::Metal);
        assert!(matches!(
            stub.init(WindowCallbacks::default()),
            Err(WindowError::Unsupported(_))
        ));
        assert!(stub.set_size(Size::new(8, 8)).is_err());
        assert_eq!(stub.format(), TextureFormat::Invalid);
        assert_eq!(stub.state(), WindowState::Failed);
        assert!(!stub.engine_running());
        assert_eq!(stub.service_window_events(), 0);

        stub.request_update(0.0);
        stub.navigate("https://servo.org/");
        stub.cleanup_renderer();
    }
}
