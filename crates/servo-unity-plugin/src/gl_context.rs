//! Current-context capture for the OpenGL backend.
//!
//! The engine makes its own context current while it updates. Windows
//! capture the host's context before that and put it back afterwards.

use servo_unity_webview::{GlContext, SavedContext};

/// The render thread's native GL context (CGL on macOS, WGL on Windows).
/// Elsewhere capture is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeGl;

impl GlContext for NativeGl {
    fn current(&self) -> SavedContext {
        imp::current()
    }

    fn make_current(&self, saved: SavedContext) {
        imp::make_current(saved);
    }
}

#[cfg(target_os = "macos")]
mod imp {
    use std::ffi::c_void;

    use servo_unity_webview::SavedContext;
    use tracing::warn;

    #[link(name = "OpenGL", kind = "framework")]
    extern "C" {
        fn CGLGetCurrentContext() -> *mut c_void;
        fn CGLSetCurrentContext(context: *mut c_void) -> i32;
    }

    pub fn current() -> SavedContext {
        SavedContext {
            context: unsafe { CGLGetCurrentContext() } as usize,
            device: 0,
        }
    }

    pub fn make_current(saved: SavedContext) {
        let err = unsafe { CGLSetCurrentContext(saved.context as *mut c_void) };
        if err != 0 {
            warn!(err, "CGLSetCurrentContext failed");
        }
    }
}

#[cfg(windows)]
mod imp {
    use std::ffi::c_void;

    use servo_unity_webview::SavedContext;
    use tracing::warn;
    use windows::Win32::Graphics::Gdi::HDC;
    use windows::Win32::Graphics::OpenGL::{
        wglGetCurrentContext, wglGetCurrentDC, wglMakeCurrent, HGLRC,
    };

    pub fn current() -> SavedContext {
        unsafe {
            SavedContext {
                context: wglGetCurrentContext().0 as usize,
                device: wglGetCurrentDC().0 as usize,
            }
        }
    }

    pub fn make_current(saved: SavedContext) {
        let device = HDC(saved.device as *mut c_void);
        let context = HGLRC(saved.context as *mut c_void);
        if let Err(e) = unsafe { wglMakeCurrent(device, context) } {
            warn!("wglMakeCurrent failed: {e}");
        }
    }
}

#[cfg(not(any(target_os = "macos", windows)))]
mod imp {
    use servo_unity_webview::SavedContext;

    pub fn current() -> SavedContext {
        SavedContext::default()
    }

    pub fn make_current(_saved: SavedContext) {}
}

#[cfg(all(test, not(any(target_os = "macos", windows))))]
mod tests {
    use super::*;

    #[test]
    fn capture_is_a_noop_without_native_context() {
        let gl = NativeGl;
        assert_eq!(gl.current(), SavedContext::default());
        gl.make_current(SavedContext { context: 1, device: 2 });
    }
}
