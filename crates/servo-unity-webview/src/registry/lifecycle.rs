use std::collections::btree_map::Entry;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use servo_unity_common::{Size, WindowError, WindowId};
use tracing::{debug, error, info, warn};

use super::WindowRegistry;
use crate::device::ActiveDevice;
use crate::session::Session;
use crate::window::{BrowserWindow, D3d11Window, GlWindow, StubWindow};

impl WindowRegistry {
    /// Create, register and initialize a window for the active backend.
    ///
    /// The window is in the map while `init` runs, so the created callback
    /// may already address it. A failed init removes it again.
    pub fn request_new_window(&self, uid_ext: i32, size: Size) -> Result<WindowId, WindowError> {
        let device = self.device.active().ok_or(WindowError::NoBackend)?;
        let id = WindowId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let window = self.build_window(device, id, uid_ext, size);

        match self.lock().entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&window));
            }
            Entry::Occupied(_) => {
                error!(window = %id, "window id collision");
                return Err(WindowError::DuplicateWindow(id));
            }
        }

        if let Err(e) = window.init(self.callbacks()) {
            self.lock().remove(&id);
            warn!(window = %id, ext = uid_ext, "window creation failed: {e}");
            return Err(e);
        }

        info!(
            window = %id,
            ext = uid_ext,
            %size,
            backend = ?window.backend(),
            "window created"
        );
        Ok(id)
    }

    fn build_window(
        &self,
        device: ActiveDevice,
        id: WindowId,
        uid_ext: i32,
        size: Size,
    ) -> Arc<dyn BrowserWindow> {
        match device {
            ActiveDevice::OpenGlCore(gl) => {
                let session = Session::new(id, uid_ext, self.context());
                Arc::new(GlWindow::new(session, size, gl))
            }
            ActiveDevice::Direct3D11(d3d) => {
                let session = Session::new(id, uid_ext, self.context());
                Arc::new(D3d11Window::new(session, size, d3d))
            }
            ActiveDevice::Unimplemented(backend) => Arc::new(StubWindow::new(id, uid_ext, backend)),
        }
    }

    /// Close one window. Returns `false` for an unknown id.
    pub fn close_window(&self, id: WindowId) -> bool {
        let Some(window) = self.lookup(id, "close") else {
            return false;
        };
        if self.params().close_native_window_on_close() {
            window.close_native_window();
        }
        self.lock().remove(&id);
        self.retire(window);
        info!(window = %id, "window closed");
        true
    }

    pub fn close_all_windows(&self) -> bool {
        let windows = std::mem::take(&mut *self.lock());
        let close_native = self.params().close_native_window_on_close();
        for (id, window) in windows {
            if close_native {
                window.close_native_window();
            }
            self.retire(window);
            info!(window = %id, "window closed");
        }
        true
    }

    /// Closing runs on the host's main thread, but the engine may only be
    /// stopped on the render thread. A window with a running engine is
    /// parked until the next render-thread call.
    fn retire(&self, window: Arc<dyn BrowserWindow>) {
        if window.engine_running() {
            debug!(window = %window.id(), "engine still running, teardown deferred to render thread");
            self.retired.lock().unwrap_or_else(|e| e.into_inner()).push(window);
        }
    }

    /// Tear down parked windows. Render thread only.
    pub fn reap_retired(&self) -> usize {
        let retired = std::mem::take(&mut *self.retired.lock().unwrap_or_else(|e| e.into_inner()));
        for window in &retired {
            window.cleanup_renderer();
        }
        retired.len()
    }
}
