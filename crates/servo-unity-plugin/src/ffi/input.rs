use std::ffi::{c_char, c_int};

use servo_unity_common::WindowId;

use super::strings::borrow_str;
use crate::plugin::plugin;

/// `param0`/`param1` carry the button for press, release and click, and
/// the discrete scroll counts for scrolling.
#[no_mangle]
pub extern "C" fn servoUnityWindowPointerEvent(
    window_index: c_int,
    event_id: c_int,
    param0: c_int,
    param1: c_int,
    x: c_int,
    y: c_int,
) {
    plugin().registry().pointer_event(
        WindowId::from_raw(window_index),
        event_id,
        param0,
        param1,
        x,
        y,
    );
}

/// `up_down` is 1 for a press and 0 for a release.
#[no_mangle]
pub extern "C" fn servoUnityKeyEvent(
    window_index: c_int,
    up_down: c_int,
    key_code: c_int,
    character: c_int,
) {
    plugin()
        .registry()
        .key_event(WindowId::from_raw(window_index), up_down, key_code, character);
}

/// # Safety
///
/// `string_param` must be null or a nul-terminated string.
#[no_mangle]
pub unsafe extern "C" fn servoUnityWindowBrowserControlEvent(
    window_index: c_int,
    event_id: c_int,
    param0: c_int,
    param1: c_int,
    string_param: *const c_char,
) {
    let text = borrow_str(string_param);
    plugin().registry().browser_control(
        WindowId::from_raw(window_index),
        event_id,
        param0,
        param1,
        text.as_deref(),
    );
}
