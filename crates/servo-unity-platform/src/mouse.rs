//! Host mouse button translation.

use servo_unity_common::MouseButton;

/// Map a host button id (0 left, 1 right, 2 middle) to an engine button.
/// Unknown ids are reported and treated as the primary button.
pub fn button_from_host(raw: i32) -> MouseButton {
    match raw {
        0 => MouseButton::Left,
        1 => MouseButton::Right,
        2 => MouseButton::Middle,
        other => {
            tracing::warn!(button = other, "unknown mouse button, using left");
            MouseButton::Left
        }
    }
}

/// Only clicks with the host's primary button id are forwarded. The raw id
/// is checked because unknown ids would otherwise map to the primary button.
pub fn is_primary_button(raw: i32) -> bool {
    raw == 0
}
