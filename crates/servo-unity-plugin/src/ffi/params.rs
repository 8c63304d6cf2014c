use std::ffi::{c_char, c_int};

use tracing::warn;

use super::strings::{borrow_str, write_truncated};
use crate::plugin::plugin;

#[no_mangle]
pub extern "C" fn servoUnitySetParamBool(param: c_int, flag: bool) {
    plugin().params().set_bool(param, flag);
}

#[no_mangle]
pub extern "C" fn servoUnitySetParamInt(param: c_int, value: c_int) {
    plugin().params().set_int(param, value);
}

#[no_mangle]
pub extern "C" fn servoUnitySetParamFloat(param: c_int, value: f32) {
    plugin().params().set_float(param, value);
}

/// # Safety
///
/// `value` must be null or a nul-terminated string.
#[no_mangle]
pub unsafe extern "C" fn servoUnitySetParamString(param: c_int, value: *const c_char) {
    match borrow_str(value) {
        Some(value) => plugin().params().set_string(param, &value),
        None => warn!(param, "null string parameter ignored"),
    }
}

#[no_mangle]
pub extern "C" fn servoUnityGetParamBool(param: c_int) -> bool {
    plugin().params().get_bool(param)
}

#[no_mangle]
pub extern "C" fn servoUnityGetParamInt(param: c_int) -> c_int {
    plugin().params().get_int(param)
}

#[no_mangle]
pub extern "C" fn servoUnityGetParamFloat(param: c_int) -> f32 {
    plugin().params().get_float(param)
}

/// Returns `false` for an unknown key or a null buffer.
///
/// # Safety
///
/// `buffer` must be null or valid for writes of `length` bytes.
#[no_mangle]
pub unsafe extern "C" fn servoUnityGetParamString(
    param: c_int,
    buffer: *mut c_char,
    length: c_int,
) -> bool {
    match plugin().params().get_string(param) {
        Some(value) => write_truncated(&value, buffer, length),
        None => false,
    }
}
