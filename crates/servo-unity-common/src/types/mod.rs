mod core;
mod format;
mod graphics;

pub use self::core::*;
pub use format::*;
pub use graphics::*;
