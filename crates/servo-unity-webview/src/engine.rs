//! Boundary to the embedded browser engine.
//!
//! The engine is a process-wide singleton reached through a fixed C API.
//! [`Engine`] is its control surface, [`EngineFactory`] starts it, and
//! [`crate::host::EngineHost`] receives its callbacks.

use servo_unity_common::{EngineError, EngineKey, GraphicsBackend, MouseButton, Size};

use crate::host::EngineHost;

/// Control surface of a running engine instance.
///
/// Every method runs on the host render thread, inside
/// `requestWindowUpdate`, with the engine's graphics context usable.
pub trait Engine: Send {
    /// Let the engine process pending work and produce a new frame.
    fn perform_updates(&mut self);

    /// Blit the current frame into a GL texture owned by the host.
    fn fill_gl_texture(&mut self, texture: u32, size: Size);

    fn resize(&mut self, size: Size);

    fn mouse_move(&mut self, x: f32, y: f32);
    fn mouse_down(&mut self, x: f32, y: f32, button: MouseButton);
    fn mouse_up(&mut self, x: f32, y: f32, button: MouseButton);
    fn click(&mut self, x: f32, y: f32);
    fn scroll(&mut self, dx: i32, dy: i32, x: i32, y: i32);

    fn key_down(&mut self, key: EngineKey);
    fn key_up(&mut self, key: EngineKey);

    /// Returns `false` if the engine rejected the URI.
    fn load_uri(&mut self, uri: &str) -> bool;
    fn is_uri_valid(&self, uri: &str) -> bool;

    fn reload(&mut self);
    fn refresh(&mut self);
    fn stop(&mut self);
    fn go_back(&mut self);
    fn go_forward(&mut self);

    /// Tear the instance down. No other method is called afterwards.
    fn deinit(&mut self);
}

/// Start-up options handed to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub api: GraphicsBackend,
    /// Command-line style arguments, e.g. `--vslogger-level warn`.
    pub args: Vec<String>,
    pub url: String,
    pub size: Size,
    pub density: f32,
    pub subpixel_text_antialiasing: bool,
    /// Engine logger module filters.
    pub log_filters: Vec<String>,
}

impl EngineOptions {
    /// Arguments joined into the single string the engine expects.
    pub fn joined_args(&self) -> String {
        self.args.join(" ")
    }
}

/// Creates the engine instance.
pub trait EngineFactory: Send + Sync {
    /// Start the engine. `host` is the callback target for this instance.
    fn start(
        &self,
        options: EngineOptions,
        host: EngineHost,
    ) -> Result<Box<dyn Engine>, EngineError>;

    /// Shared D3D11 texture handle the engine renders into, if any.
    fn shared_texture_handle(&self) -> Option<usize> {
        None
    }

    /// Engine version string, if the engine reports one.
    fn version(&self) -> Option<String> {
        None
    }
}

/// Factory used when the plugin is built without an engine binding.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableEngine;

impl EngineFactory for UnavailableEngine {
    fn start(
        &self,
        _options: EngineOptions,
        _host: EngineHost,
    ) -> Result<Box<dyn Engine>, EngineError> {
        Err(EngineError::Unavailable(
            "plugin was built without an engine binding".into(),
        ))
    }
}
