//! Render-thread entry points.
//!
//! `requestWindowUpdate` and `cleanupRenderer` must run with the host's
//! graphics context current. From managed code that means going through
//! the render-event function: stage the parameters here, then issue the
//! plugin event on the render thread.

use std::ffi::c_int;

use servo_unity_common::WindowId;

use crate::plugin::plugin;

#[no_mangle]
pub extern "C" fn servoUnityRequestWindowUpdate(window_index: c_int, time_delta: f32) {
    plugin()
        .registry()
        .request_update(WindowId::from_raw(window_index), time_delta);
}

#[no_mangle]
pub extern "C" fn servoUnityCleanupRenderer(window_index: c_int) {
    plugin().registry().cleanup_renderer(WindowId::from_raw(window_index));
}

/// Stage the arguments for render event 1 (update).
#[no_mangle]
pub extern "C" fn servoUnitySetRenderEventFunc1Params(window_index: c_int, time_delta: f32) {
    plugin().dispatch().stage_update(window_index, time_delta);
}

/// Stage the argument for render event 2 (cleanup).
#[no_mangle]
pub extern "C" fn servoUnitySetRenderEventFunc2Param(window_index: c_int) {
    plugin().dispatch().stage_cleanup(window_index);
}
