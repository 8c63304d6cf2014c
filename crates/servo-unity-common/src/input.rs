//! Input and control vocabularies shared by the host boundary and the engine.

use serde::{Deserialize, Serialize};

/// Pointer event kinds sent by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEvent {
    Enter,
    Exit,
    Over,
    Press,
    Release,
    Click,
    ScrollDiscrete,
}

impl PointerEvent {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Enter),
            1 => Some(Self::Exit),
            2 => Some(Self::Over),
            3 => Some(Self::Press),
            4 => Some(Self::Release),
            5 => Some(Self::Click),
            6 => Some(Self::ScrollDiscrete),
            _ => None,
        }
    }
}

/// Browser navigation controls sent by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrowserControl {
    Refresh,
    Reload,
    Stop,
    GoBack,
    GoForward,
    GoHome,
    Navigate,
}

impl BrowserControl {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Refresh),
            1 => Some(Self::Reload),
            2 => Some(Self::Stop),
            3 => Some(Self::GoBack),
            4 => Some(Self::GoForward),
            5 => Some(Self::GoHome),
            6 => Some(Self::Navigate),
            _ => None,
        }
    }
}

/// Mouse buttons understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Key types understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineKey {
    /// A printable character.
    Character(char),
    Backspace,
    Delete,
    Tab,
    Clear,
    Enter,
    Pause,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    /// Function key `F1..=F15`.
    Function(u8),
    NumLock,
    CapsLock,
    ScrollLock,
    Shift,
    Control,
    Alt,
    AltGraph,
    Super,
    Help,
    PrintScreen,
    ContextMenu,
}

/// Whether a key went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyDirection {
    Down,
    Up,
}

impl KeyDirection {
    /// Host convention: non-zero is down.
    pub fn from_raw(raw: i32) -> Self {
        if raw != 0 {
            Self::Down
        } else {
            Self::Up
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_event_from_raw() {
        assert_eq!(PointerEvent::from_raw(0), Some(PointerEvent::Enter));
        assert_eq!(PointerEvent::from_raw(3), Some(PointerEvent::Press));
        assert_eq!(PointerEvent::from_raw(5), Some(PointerEvent::Click));
        assert_eq!(PointerEvent::from_raw(6), Some(PointerEvent::ScrollDiscrete));
        assert_eq!(PointerEvent::from_raw(7), None);
        assert_eq!(PointerEvent::from_raw(-1), None);
    }

    #[test]
    fn browser_control_from_raw() {
        assert_eq!(BrowserControl::from_raw(0), Some(BrowserControl::Refresh));
        assert_eq!(BrowserControl::from_raw(5), Some(BrowserControl::GoHome));
        assert_eq!(BrowserControl::from_raw(6), Some(BrowserControl::Navigate));
        assert_eq!(BrowserControl::from_raw(7), None);
    }

    #[test]
    fn key_direction_from_raw() {
        assert_eq!(KeyDirection::from_raw(1), KeyDirection::Down);
        assert_eq!(KeyDirection::from_raw(0), KeyDirection::Up);
        assert_eq!(KeyDirection::from_raw(-1), KeyDirection::Down);
    }
}
