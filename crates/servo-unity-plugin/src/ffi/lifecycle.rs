use std::ffi::{c_char, c_int};
use std::sync::Arc;

use servo_unity_common::{BrowserEvent, Size, TextureFormat, WindowId};
use servo_unity_platform::LogCallback;
use servo_unity_webview::window::{BrowserEventCallback, CreatedCallback, ResizedCallback};
use servo_unity_webview::WindowCallbacks;

use super::strings::{borrow_str, to_c_string, write_truncated};
use super::{
    host_int, PfnBrowserEventCallback, PfnFullScreenBeginCallback, PfnFullScreenEndCallback,
    PfnLogCallback, PfnWindowCreatedCallback, PfnWindowResizedCallback,
};
use crate::plugin::{plugin, FullscreenBeginCallback, FullscreenEndCallback, PLUGIN_VERSION};

// =============================================================================
// LOGGING
// =============================================================================

/// Install (or clear, with null) the host log callback.
#[no_mangle]
pub extern "C" fn servoUnityRegisterLogCallback(callback: PfnLogCallback) {
    let callback = callback.map(|f| -> LogCallback {
        Arc::new(move |line: &str| {
            let line = to_c_string(line);
            unsafe { f(line.as_ptr()) }
        })
    });
    plugin().register_log_callback(callback);
}

#[no_mangle]
pub extern "C" fn servoUnitySetLogLevel(level: c_int) {
    plugin().set_log_level(level);
}

/// Deliver log lines buffered from other threads. Call from the thread
/// that registered the callback.
#[no_mangle]
pub extern "C" fn servoUnityFlushLog() {
    plugin().flush_log();
}

// =============================================================================
// PLUGIN
// =============================================================================

/// # Safety
///
/// `buffer` must be null or valid for writes of `length` bytes.
#[no_mangle]
pub unsafe extern "C" fn servoUnityGetVersion(buffer: *mut c_char, length: c_int) -> bool {
    write_truncated(PLUGIN_VERSION, buffer, length)
}

#[no_mangle]
pub extern "C" fn servoUnityInit(
    window_created: PfnWindowCreatedCallback,
    window_resized: PfnWindowResizedCallback,
    browser_event: PfnBrowserEventCallback,
) {
    plugin().init(callbacks(window_created, window_resized, browser_event));
}

#[no_mangle]
pub extern "C" fn servoUnityFinalise() {
    plugin().finalize();
}

/// # Safety
///
/// `path` must be null or a nul-terminated string.
#[no_mangle]
pub unsafe extern "C" fn servoUnitySetResourcesPath(path: *const c_char) {
    plugin().set_resources_path(borrow_str(path).as_deref());
}

#[no_mangle]
pub extern "C" fn servoUnityRegisterFullScreenBeginCallback(callback: PfnFullScreenBeginCallback) {
    plugin().register_fullscreen_begin(fullscreen_begin(callback));
}

#[no_mangle]
pub extern "C" fn servoUnityRegisterFullScreenEndCallback(callback: PfnFullScreenEndCallback) {
    plugin().register_fullscreen_end(fullscreen_end(callback));
}

fn fullscreen_begin(callback: PfnFullScreenBeginCallback) -> Option<FullscreenBeginCallback> {
    callback.map(|f| -> FullscreenBeginCallback {
        Arc::new(move |size: Size, format: TextureFormat, projection: i32| unsafe {
            f(host_int(size.width), host_int(size.height), format.as_raw(), projection)
        })
    })
}

fn fullscreen_end(callback: PfnFullScreenEndCallback) -> Option<FullscreenEndCallback> {
    callback.map(|f| -> FullscreenEndCallback { Arc::new(move || unsafe { f() }) })
}

fn callbacks(
    window_created: PfnWindowCreatedCallback,
    window_resized: PfnWindowResizedCallback,
    browser_event: PfnBrowserEventCallback,
) -> WindowCallbacks {
    WindowCallbacks {
        created: window_created.map(|f| -> CreatedCallback {
            Arc::new(move |uid_ext: i32, id: WindowId, size: Size, format: TextureFormat| unsafe {
                f(
                    uid_ext,
                    id.as_raw(),
                    host_int(size.width),
                    host_int(size.height),
                    format.as_raw(),
                )
            })
        }),
        resized: window_resized.map(|f| -> ResizedCallback {
            Arc::new(move |uid_ext: i32, size: Size| unsafe {
                f(uid_ext, host_int(size.width), host_int(size.height))
            })
        }),
        browser_event: browser_event.map(|f| -> BrowserEventCallback {
            Arc::new(move |uid_ext: i32, event: BrowserEvent| unsafe {
                f(uid_ext, event.kind.as_raw(), event.data1, event.data2)
            })
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use servo_unity_common::BrowserEventKind;

    use super::*;

    static EVENTS: Mutex<Vec<(c_int, c_int, c_int, c_int)>> = Mutex::new(Vec::new());
    static CREATED: Mutex<Vec<(c_int, c_int, c_int, c_int, c_int)>> = Mutex::new(Vec::new());
    static FULLSCREEN: Mutex<Vec<(c_int, c_int, c_int, c_int)>> = Mutex::new(Vec::new());

    unsafe extern "C" fn on_fullscreen_begin(w: c_int, h: c_int, format: c_int, projection: c_int) {
        FULLSCREEN.lock().unwrap().push((w, h, format, projection));
    }

    unsafe extern "C" fn on_event(uid_ext: c_int, kind: c_int, data1: c_int, data2: c_int) {
        EVENTS.lock().unwrap().push((uid_ext, kind, data1, data2));
    }

    unsafe extern "C" fn on_created(uid_ext: c_int, id: c_int, w: c_int, h: c_int, format: c_int) {
        CREATED.lock().unwrap().push((uid_ext, id, w, h, format));
    }

    #[test]
    fn host_callbacks_receive_raw_values() {
        let callbacks = callbacks(Some(on_created), None, Some(on_event));
        assert!(callbacks.resized.is_none());

        callbacks.notify_created(9, WindowId(2), Size::new(640, 480), TextureFormat::Bgra32);
        assert_eq!(*CREATED.lock().unwrap(), vec![(9, 2, 640, 480, 2)]);

        let event = callbacks.browser_event.as_ref().unwrap();
        event(9, BrowserEvent::history(true, false));
        event(9, BrowserEvent::new(BrowserEventKind::TitleChanged));
        assert_eq!(*EVENTS.lock().unwrap(), vec![(9, 5, 1, 0), (9, 6, 0, 0)]);
    }

    #[test]
    fn version_is_written_terminated() {
        let mut buf = [0xffu8; 16];
        assert!(unsafe { servoUnityGetVersion(buf.as_mut_ptr().cast(), 16) });
        let end = buf.iter().position(|&b| b == 0).unwrap();
        assert_eq!(&buf[..end], PLUGIN_VERSION.as_bytes());
        assert!(!unsafe { servoUnityGetVersion(std::ptr::null_mut(), 16) });
    }

    #[test]
    fn fullscreen_begin_receives_raw_values() {
        let begin = fullscreen_begin(Some(on_fullscreen_begin)).unwrap();
        begin(Size::new(1920, 1080), TextureFormat::Bgra32, 1);
        assert_eq!(*FULLSCREEN.lock().unwrap(), vec![(1920, 1080, 2, 1)]);

        assert!(fullscreen_begin(None).is_none());
        assert!(fullscreen_end(None).is_none());
    }
}
