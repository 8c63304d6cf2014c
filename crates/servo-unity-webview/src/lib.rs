//! Browser windows backed by the embedded engine.
//!
//! Provides:
//! - The per-window trait and its OpenGL, Direct3D 11 and stub backends
//! - Task and event queues between the host threads and the engine
//! - The single-instance engine slot and engine callback host
//! - The window registry, device lifecycle and render-event dispatch

pub mod device;
pub mod dispatch;
pub mod engine;
pub mod events;
pub mod host;
pub mod navigation;
pub mod registry;
pub mod session;
pub mod slot;
pub mod tasks;
pub mod window;

#[cfg(test)]
mod testing;

pub use device::{ActiveDevice, DeviceLifecycle, DeviceProvider};
pub use dispatch::{RenderDispatch, RENDER_EVENT_CLEANUP, RENDER_EVENT_UPDATE};
pub use engine::{Engine, EngineFactory, EngineOptions, UnavailableEngine};
pub use events::{EventQueue, PendingBrowserEvent};
pub use host::{
    ContextMenuResult, DevtoolsState, EngineHost, MediaPlaybackState, PromptResult,
    WindowMetadata,
};
pub use registry::{TextureInfo, WindowRegistry};
pub use session::{Session, SessionContext};
pub use slot::EngineSlot;
pub use window::{
    BrowserWindow, ContextGuard, D3d11Device, GlContext, SavedContext, SharedTexture,
    WindowCallbacks,
};
