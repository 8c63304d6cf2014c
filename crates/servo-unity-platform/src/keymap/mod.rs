//! Host key code translation.

mod table;
mod types;

pub use table::{engine_key_for, translate, KeyInput};
pub use types::HostKeyCode;
