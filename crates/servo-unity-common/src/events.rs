//! Browser events relayed back to the host.

use serde::{Deserialize, Serialize};

/// Event kinds delivered through the host's browser-event callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum BrowserEventKind {
    Nop = 0,
    Shutdown = 1,
    /// `data1`: 1 = load started, 0 = load ended.
    LoadStateChanged = 2,
    FullscreenStateChanged = 3,
    /// `data1`: 1 = show IME, 0 = hide IME.
    ImeStateChanged = 4,
    /// `data1`: can go back, `data2`: can go forward.
    HistoryChanged = 5,
    TitleChanged = 6,
    UrlChanged = 7,
}

impl BrowserEventKind {
    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

/// A browser event as seen by the host: kind plus two integer payload slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserEvent {
    pub kind: BrowserEventKind,
    pub data1: i32,
    pub data2: i32,
}

impl BrowserEvent {
    pub fn new(kind: BrowserEventKind) -> Self {
        Self {
            kind,
            data1: 0,
            data2: 0,
        }
    }

    pub fn with_data(kind: BrowserEventKind, data1: i32, data2: i32) -> Self {
        Self { kind, data1, data2 }
    }

    pub fn load_state(started: bool) -> Self {
        Self::with_data(BrowserEventKind::LoadStateChanged, i32::from(started), 0)
    }

    pub fn history(can_go_back: bool, can_go_forward: bool) -> Self {
        Self::with_data(
            BrowserEventKind::HistoryChanged,
            i32::from(can_go_back),
            i32::from(can_go_forward),
        )
    }

    pub fn ime(show: bool) -> Self {
        Self::with_data(BrowserEventKind::ImeStateChanged, i32::from(show), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values() {
        assert_eq!(BrowserEventKind::Nop.as_raw(), 0);
        assert_eq!(BrowserEventKind::Shutdown.as_raw(), 1);
        assert_eq!(BrowserEventKind::LoadStateChanged.as_raw(), 2);
        assert_eq!(BrowserEventKind::ImeStateChanged.as_raw(), 4);
        assert_eq!(BrowserEventKind::HistoryChanged.as_raw(), 5);
        assert_eq!(BrowserEventKind::UrlChanged.as_raw(), 7);
    }

    #[test]
    fn load_state_payload() {
        assert_eq!(BrowserEvent::load_state(true).data1, 1);
        assert_eq!(BrowserEvent::load_state(false).data1, 0);
    }

    #[test]
    fn history_payload() {
        let e = BrowserEvent::history(true, false);
        assert_eq!(e.kind, BrowserEventKind::HistoryChanged);
        assert_eq!((e.data1, e.data2), (1, 0));
    }

    #[test]
    fn ime_payload() {
        assert_eq!(BrowserEvent::ime(true).data1, 1);
        assert_eq!(BrowserEvent::ime(false).data1, 0);
    }
}
