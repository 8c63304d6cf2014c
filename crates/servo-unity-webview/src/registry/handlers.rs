use servo_unity_common::{BrowserControl, MouseButton, PointerEvent, Size, TextureFormat, WindowId};
use servo_unity_platform::{button_from_host, is_primary_button, translate_key};
use tracing::{debug, error, warn};

use super::WindowRegistry;
use crate::host::WindowMetadata;

/// What the host needs to allocate a texture for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub size: Size,
    pub format: TextureFormat,
    pub mip_chain: bool,
    pub linear: bool,
    pub native_ptr: usize,
}

impl WindowRegistry {
    // =========================================================================
    // TEXTURE
    // =========================================================================

    pub fn set_window_texture(&self, id: WindowId, native_ptr: usize) -> bool {
        let Some(window) = self.lookup(id, "set texture") else {
            return false;
        };
        window.set_native_ptr(native_ptr);
        debug!(window = %id, native_ptr, "texture bound");
        true
    }

    pub fn texture_info(&self, id: WindowId) -> Option<TextureInfo> {
        let window = self.lookup(id, "texture format")?;
        Some(TextureInfo {
            size: window.size(),
            format: window.format(),
            mip_chain: false,
            linear: true,
            native_ptr: window.native_ptr(),
        })
    }

    pub fn request_size_change(&self, id: WindowId, size: Size) -> bool {
        let Some(window) = self.lookup(id, "resize") else {
            return false;
        };
        match window.set_size(size) {
            Ok(actual) => {
                debug!(window = %id, requested = %size, %actual, "window resized");
                true
            }
            Err(e) => {
                warn!(window = %id, "resize failed: {e}");
                false
            }
        }
    }

    // =========================================================================
    // RENDER THREAD
    // =========================================================================

    pub fn request_update(&self, id: WindowId, time_delta: f32) {
        if self.device.backend().is_none() {
            error!(window = %id, "update requested with no graphics backend");
            return;
        }
        self.reap_retired();
        if let Some(window) = self.lookup(id, "update") {
            window.request_update(time_delta);
        }
    }

    pub fn cleanup_renderer(&self, id: WindowId) {
        if self.device.backend().is_none() {
            error!(window = %id, "cleanup requested with no graphics backend");
            return;
        }
        self.reap_retired();
        if let Some(window) = self.lookup(id, "cleanup") {
            window.cleanup_renderer();
        }
    }

    // =========================================================================
    // HOST THREAD
    // =========================================================================

    /// Deliver queued browser events for `id`. Returns how many.
    pub fn service_window_events(&self, id: WindowId) -> Option<usize> {
        let window = self.lookup(id, "service events")?;
        Some(window.service_window_events())
    }

    pub fn window_metadata(&self, id: WindowId) -> Option<WindowMetadata> {
        let window = self.lookup(id, "metadata")?;
        Some(window.metadata())
    }

    /// Route a raw host pointer event. `param0` is the mouse button for
    /// press/release/click; `param0`/`param1` are the scroll counts for
    /// discrete scrolling.
    pub fn pointer_event(&self, id: WindowId, event: i32, param0: i32, param1: i32, x: i32, y: i32) {
        let Some(kind) = PointerEvent::from_raw(event) else {
            warn!(window = %id, event, "unknown pointer event");
            return;
        };
        let Some(window) = self.lookup(id, "pointer event") else {
            return;
        };

        match kind {
            PointerEvent::Enter => window.pointer_enter(),
            PointerEvent::Exit => window.pointer_exit(),
            PointerEvent::Over => window.pointer_over(x, y),
            PointerEvent::Press => window.pointer_press(button_from_host(param0), x, y),
            PointerEvent::Release => window.pointer_release(button_from_host(param0), x, y),
            PointerEvent::Click if is_primary_button(param0) => {
                window.pointer_click(MouseButton::Left, x, y)
            }
            PointerEvent::Click => debug!(window = %id, button = param0, "ignoring non-primary click"),
            PointerEvent::ScrollDiscrete => window.pointer_scroll_discrete(param0, param1, x, y),
        }
    }

    pub fn key_event(&self, id: WindowId, up_down: i32, key_code: i32, character: i32) {
        let Some(window) = self.lookup(id, "key event") else {
            return;
        };
        if let Some(input) = translate_key(up_down, key_code, character) {
            window.key_event(input);
        }
    }

    pub fn browser_control(
        &self,
        id: WindowId,
        event: i32,
        _param0: i32,
        _param1: i32,
        text: Option<&str>,
    ) {
        let Some(control) = BrowserControl::from_raw(event) else {
            warn!(window = %id, event, "unknown browser control event");
            return;
        };
        let Some(window) = self.lookup(id, "browser control") else {
            return;
        };

        match control {
            BrowserControl::Refresh => window.refresh(),
            BrowserControl::Reload => window.reload(),
            BrowserControl::Stop => window.stop(),
            BrowserControl::GoBack => window.go_back(),
            BrowserControl::GoForward => window.go_forward(),
            BrowserControl::GoHome => window.go_home(),
            BrowserControl::Navigate => match text {
                Some(text) => window.navigate(text),
                None => warn!(window = %id, "navigate without a target"),
            },
        }
    }
}
