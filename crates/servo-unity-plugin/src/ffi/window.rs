use std::ffi::{c_char, c_int, c_void};

use servo_unity_common::{buffer_size_for_format, Size, WindowId};
use tracing::error;

use super::host_int;
use super::strings::write_truncated;
use crate::plugin::plugin;

// =============================================================================
// CREATION & TEARDOWN
// =============================================================================

#[no_mangle]
pub extern "C" fn servoUnityGetWindowCount() -> c_int {
    c_int::try_from(plugin().registry().window_count()).unwrap_or(c_int::MAX)
}

/// Create a window. The created callback fires before this returns.
#[no_mangle]
pub extern "C" fn servoUnityRequestNewWindow(uid_ext: c_int, width: c_int, height: c_int) -> bool {
    match plugin()
        .registry()
        .request_new_window(uid_ext, Size::from_host(width, height))
    {
        Ok(_) => true,
        Err(e) => {
            error!(ext = uid_ext, "cannot create window: {e}");
            false
        }
    }
}

#[no_mangle]
pub extern "C" fn servoUnityCloseWindow(window_index: c_int) -> bool {
    plugin().registry().close_window(WindowId::from_raw(window_index))
}

#[no_mangle]
pub extern "C" fn servoUnityCloseAllWindows() -> bool {
    plugin().registry().close_all_windows()
}

// =============================================================================
// TEXTURE
// =============================================================================

/// Report size, format and texture binding. Null out-pointers are skipped.
///
/// # Safety
///
/// Each pointer must be null or valid for a write of its type.
#[no_mangle]
pub unsafe extern "C" fn servoUnityGetWindowTextureFormat(
    window_index: c_int,
    width: *mut c_int,
    height: *mut c_int,
    format: *mut c_int,
    mip_chain: *mut bool,
    linear: *mut bool,
    native_texture_id: *mut *mut c_void,
) -> bool {
    let Some(info) = plugin().registry().texture_info(WindowId::from_raw(window_index)) else {
        return false;
    };

    if let Some(out) = width.as_mut() {
        *out = host_int(info.size.width);
    }
    if let Some(out) = height.as_mut() {
        *out = host_int(info.size.height);
    }
    if let Some(out) = format.as_mut() {
        *out = info.format.as_raw();
    }
    if let Some(out) = mip_chain.as_mut() {
        *out = info.mip_chain;
    }
    if let Some(out) = linear.as_mut() {
        *out = info.linear;
    }
    if let Some(out) = native_texture_id.as_mut() {
        *out = info.native_ptr as *mut c_void;
    }
    true
}

#[no_mangle]
pub extern "C" fn servoUnityGetBufferSizeForTextureFormat(
    width: c_int,
    height: c_int,
    format: c_int,
) -> u64 {
    buffer_size_for_format(width, height, format)
}

#[no_mangle]
pub extern "C" fn servoUnitySetWindowUnityTextureID(
    window_index: c_int,
    native_texture_id: *mut c_void,
) -> bool {
    plugin()
        .registry()
        .set_window_texture(WindowId::from_raw(window_index), native_texture_id as usize)
}

#[no_mangle]
pub extern "C" fn servoUnityRequestWindowSizeChange(
    window_index: c_int,
    width: c_int,
    height: c_int,
) -> bool {
    plugin()
        .registry()
        .request_size_change(WindowId::from_raw(window_index), Size::from_host(width, height))
}

// =============================================================================
// EVENTS & METADATA
// =============================================================================

/// Deliver queued browser events through the browser-event callback.
#[no_mangle]
pub extern "C" fn servoUnityServiceWindowEvents(window_index: c_int) {
    plugin()
        .registry()
        .service_window_events(WindowId::from_raw(window_index));
}

/// Copy the window's title and URL. Each buffer is truncated and
/// nul-terminated on its own; null buffers are skipped.
///
/// # Safety
///
/// Each buffer must be null or valid for writes of its length.
#[no_mangle]
pub unsafe extern "C" fn servoUnityGetWindowMetadata(
    window_index: c_int,
    title: *mut c_char,
    title_len: c_int,
    url: *mut c_char,
    url_len: c_int,
) -> bool {
    let Some(metadata) = plugin().registry().window_metadata(WindowId::from_raw(window_index))
    else {
        return false;
    };
    write_truncated(&metadata.title, title, title_len);
    write_truncated(&metadata.url, url, url_len);
    true
}
