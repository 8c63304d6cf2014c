use std::collections::HashMap;
use std::sync::LazyLock;

use servo_unity_common::{EngineKey, KeyDirection};
use tracing::{debug, warn};

use super::types::HostKeyCode;

/// Host key code to engine key. Keys that type a fixed character (space,
/// keypad digits and operators) map to `EngineKey::Character`.
static KEY_TABLE: LazyLock<HashMap<HostKeyCode, EngineKey>> = LazyLock::new(|| {
    use HostKeyCode as H;

    let mut table = HashMap::from([
        (H::Backspace, EngineKey::Backspace),
        (H::Delete, EngineKey::Delete),
        (H::Tab, EngineKey::Tab),
        (H::Clear, EngineKey::Clear),
        (H::Return, EngineKey::Enter),
        (H::Pause, EngineKey::Pause),
        (H::Escape, EngineKey::Escape),
        (H::Space, EngineKey::Character(' ')),
        (H::UpArrow, EngineKey::Up),
        (H::DownArrow, EngineKey::Down),
        (H::RightArrow, EngineKey::Right),
        (H::LeftArrow, EngineKey::Left),
        (H::Insert, EngineKey::Insert),
        (H::Home, EngineKey::Home),
        (H::End, EngineKey::End),
        (H::PageUp, EngineKey::PageUp),
        (H::PageDown, EngineKey::PageDown),
        (H::Numlock, EngineKey::NumLock),
        (H::CapsLock, EngineKey::CapsLock),
        (H::ScrollLock, EngineKey::ScrollLock),
        (H::RightShift, EngineKey::Shift),
        (H::LeftShift, EngineKey::Shift),
        (H::RightControl, EngineKey::Control),
        (H::LeftControl, EngineKey::Control),
        (H::RightAlt, EngineKey::Alt),
        (H::LeftAlt, EngineKey::Alt),
        (H::LeftCommand, EngineKey::Super),
        (H::LeftWindows, EngineKey::Super),
        (H::RightCommand, EngineKey::Super),
        (H::RightWindows, EngineKey::Super),
        (H::AltGr, EngineKey::AltGraph),
        (H::Help, EngineKey::Help),
        (H::Print, EngineKey::PrintScreen),
        (H::Break, EngineKey::Pause),
        (H::Menu, EngineKey::ContextMenu),
        (H::KeypadPeriod, EngineKey::Character('.')),
        (H::KeypadDivide, EngineKey::Character('/')),
        (H::KeypadMultiply, EngineKey::Character('*')),
        (H::KeypadMinus, EngineKey::Character('-')),
        (H::KeypadPlus, EngineKey::Character('+')),
        (H::KeypadEnter, EngineKey::Enter),
        (H::KeypadEquals, EngineKey::Character('=')),
    ]);

    let function_keys = [
        H::F1, H::F2, H::F3, H::F4, H::F5, H::F6, H::F7, H::F8, H::F9, H::F10, H::F11, H::F12,
        H::F13, H::F14, H::F15,
    ];
    for (n, code) in (1u8..).zip(function_keys) {
        table.insert(code, EngineKey::Function(n));
    }

    let keypad_digits = [
        H::Keypad0, H::Keypad1, H::Keypad2, H::Keypad3, H::Keypad4, H::Keypad5, H::Keypad6,
        H::Keypad7, H::Keypad8, H::Keypad9,
    ];
    for (digit, code) in ('0'..='9').zip(keypad_digits) {
        table.insert(code, EngineKey::Character(digit));
    }

    table
});

/// A host key event translated for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub direction: KeyDirection,
    pub key: EngineKey,
}

/// Translate a raw host key event.
///
/// Returns `None` for codes the table does not know and for `Character`
/// events whose scalar is not a valid `char`.
pub fn translate(up_down: i32, key_code: i32, character: i32) -> Option<KeyInput> {
    let direction = KeyDirection::from_raw(up_down);

    let Some(code) = HostKeyCode::from_raw(key_code) else {
        debug!(key_code, "ignoring unknown host key code");
        return None;
    };

    let key = if code == HostKeyCode::Character {
        let scalar = u32::try_from(character).ok().and_then(char::from_u32);
        match scalar {
            Some(c) => EngineKey::Character(c),
            None => {
                warn!(character, "ignoring character key with invalid scalar");
                return None;
            }
        }
    } else {
        match KEY_TABLE.get(&code) {
            Some(key) => *key,
            None => {
                debug!(?code, "host key has no engine mapping");
                return None;
            }
        }
    };

    Some(KeyInput { direction, key })
}

/// Look up the engine key for a non-character host code.
pub fn engine_key_for(code: HostKeyCode) -> Option<EngineKey> {
    KEY_TABLE.get(&code).copied()
}
