pub mod errors;
pub mod events;
pub mod input;
pub mod types;

pub use errors::{ConfigError, EngineError, PlatformError, ServoUnityError, WindowError};
pub use events::{BrowserEvent, BrowserEventKind};
pub use input::{BrowserControl, EngineKey, KeyDirection, MouseButton, PointerEvent};
pub use types::{
    buffer_size_for_format, DeviceEvent, GraphicsBackend, Renderer, Size, TextureFormat,
    WindowId, WindowState,
};

pub type Result<T> = std::result::Result<T, ServoUnityError>;
