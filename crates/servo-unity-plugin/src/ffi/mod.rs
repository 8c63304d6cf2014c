//! Flat C entry points called by the host's managed code.
//!
//! Every export decodes its raw arguments, forwards to [`crate::plugin()`]
//! and flattens the outcome to a plain value. Failures are logged, never
//! propagated across the boundary.

#![allow(non_snake_case)]

pub mod input;
pub mod lifecycle;
pub mod params;
pub mod render;
pub mod strings;
pub mod window;

use std::ffi::{c_char, c_int};

/// Host log callback: one nul-terminated line or batch of lines.
pub type PfnLogCallback = Option<unsafe extern "C" fn(message: *const c_char)>;

pub type PfnWindowCreatedCallback = Option<
    unsafe extern "C" fn(uid_ext: c_int, window_index: c_int, width: c_int, height: c_int, format: c_int),
>;

pub type PfnWindowResizedCallback =
    Option<unsafe extern "C" fn(uid_ext: c_int, width: c_int, height: c_int)>;

pub type PfnBrowserEventCallback =
    Option<unsafe extern "C" fn(uid_ext: c_int, event_type: c_int, data1: c_int, data2: c_int)>;

pub type PfnFullScreenBeginCallback = Option<
    unsafe extern "C" fn(width: c_int, height: c_int, format: c_int, projection: c_int),
>;

pub type PfnFullScreenEndCallback = Option<unsafe extern "C" fn()>;

/// Clamp an unsigned dimension into a host `int`.
pub(crate) fn host_int(value: u32) -> c_int {
    c_int::try_from(value).unwrap_or(c_int::MAX)
}
