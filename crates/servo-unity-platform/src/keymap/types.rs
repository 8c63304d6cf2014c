/// Key codes sent by the host's `keyEvent` entry point.
///
/// `Character` carries its Unicode scalar in the separate `character`
/// argument; every other code identifies a non-text or keypad key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum HostKeyCode {
    Character = 1,
    Backspace,
    Delete,
    Tab,
    Clear,
    Return,
    Pause,
    Escape,
    Space,
    UpArrow,
    DownArrow,
    RightArrow,
    LeftArrow,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    Numlock,
    CapsLock,
    ScrollLock,
    RightShift,
    LeftShift,
    RightControl,
    LeftControl,
    RightAlt,
    LeftAlt,
    LeftCommand,
    LeftWindows,
    RightCommand,
    RightWindows,
    AltGr,
    Help,
    Print,
    SysReq,
    Break,
    Menu,
    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadPeriod,
    KeypadDivide,
    KeypadMultiply,
    KeypadMinus,
    KeypadPlus,
    KeypadEnter,
    KeypadEquals,
}

impl HostKeyCode {
    /// Every code, in wire order.
    pub const ALL: [HostKeyCode; 69] = {
        use HostKeyCode::*;
        [
            Character, Backspace, Delete, Tab, Clear, Return, Pause, Escape, Space, UpArrow,
            DownArrow, RightArrow, LeftArrow, Insert, Home, End, PageUp, PageDown, F1, F2, F3,
            F4, F5, F6, F7, F8, F9, F10, F11, F12, F13, F14, F15, Numlock, CapsLock, ScrollLock,
            RightShift, LeftShift, RightControl, LeftControl, RightAlt, LeftAlt, LeftCommand,
            LeftWindows, RightCommand, RightWindows, AltGr, Help, Print, SysReq, Break, Menu,
            Keypad0, Keypad1, Keypad2, Keypad3, Keypad4, Keypad5, Keypad6, Keypad7, Keypad8,
            Keypad9, KeypadPeriod, KeypadDivide, KeypadMultiply, KeypadMinus, KeypadPlus,
            KeypadEnter, KeypadEquals,
        ]
    };

    pub fn from_raw(raw: i32) -> Option<Self> {
        let index = usize::try_from(raw.checked_sub(1)?).ok()?;
        Self::ALL.get(index).copied()
    }

    pub fn as_raw(self) -> i32 {
        self as i32
    }
}
