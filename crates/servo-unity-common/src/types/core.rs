use serde::{Deserialize, Serialize};
use std::fmt;

/// Plugin-local window key. Assigned monotonically by the registry,
/// starting at 1, and never reused while the window lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u32);

impl WindowId {
    /// Decode a host window index. Negative values map to 0, which is
    /// never assigned.
    pub fn from_raw(raw: i32) -> Self {
        Self(raw.max(0) as u32)
    }

    pub fn as_raw(self) -> i32 {
        i32::try_from(self.0).unwrap_or(i32::MAX)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Pixel dimensions of a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Builds a size from host-side signed integers, clamping negatives to 0.
    pub fn from_host(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Lifecycle of a browser window.
///
/// `Uninitialized -> Initializing -> Ready -> (Updating <-> Ready) -> TornDown`.
/// `Failed` is reached only from `Initializing`. Both `TornDown` and
/// `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowState {
    Uninitialized,
    Initializing,
    Ready,
    Updating,
    TornDown,
    Failed,
}
