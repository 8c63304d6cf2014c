//! Binding to the embedded engine's C API (cargo feature `simpleservo`).

mod callbacks;
mod sys;

use std::ffi::{c_char, CStr, CString};
use std::sync::Once;

use servo_unity_common::{EngineError, EngineKey, GraphicsBackend, MouseButton, Size};
use servo_unity_webview::{Engine, EngineFactory, EngineHost, EngineOptions, EngineSlot};
use tracing::{debug, info};

use sys::CMouseButton;

static PANIC_HANDLER: Once = Once::new();

fn c_string(what: &str, text: &str) -> Result<CString, EngineError> {
    CString::new(text).map_err(|e| EngineError::InitFailed(format!("{what} contains a nul: {e}")))
}

fn dim(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn button(button: MouseButton) -> CMouseButton {
    match button {
        MouseButton::Left => CMouseButton::Left,
        MouseButton::Right => CMouseButton::Right,
        MouseButton::Middle => CMouseButton::Middle,
    }
}

/// Starts the process-wide engine. Callbacks find their window through
/// `slot`, which must be the slot sessions activate.
pub struct SimpleServoFactory;

impl SimpleServoFactory {
    pub fn new(slot: EngineSlot) -> Self {
        callbacks::bind_slot(slot);
        Self
    }
}

impl EngineFactory for SimpleServoFactory {
    fn start(
        &self,
        options: EngineOptions,
        host: EngineHost,
    ) -> Result<Box<dyn Engine>, EngineError> {
        let args = c_string("args", &options.joined_args())?;
        let url = c_string("url", &options.url)?;
        let filters = options
            .log_filters
            .iter()
            .map(|f| c_string("log filter", f))
            .collect::<Result<Vec<_>, _>>()?;
        let filter_ptrs: Vec<*const c_char> = filters.iter().map(|f| f.as_ptr()).collect();

        let init = sys::CInitOptions {
            args: args.as_ptr(),
            url: url.as_ptr(),
            width: dim(options.size.width),
            height: dim(options.size.height),
            density: options.density,
            enable_subpixel_text_antialiasing: options.subpixel_text_antialiasing,
            vslogger_mod_list: if filter_ptrs.is_empty() {
                std::ptr::null()
            } else {
                filter_ptrs.as_ptr()
            },
            vslogger_mod_size: u32::try_from(filter_ptrs.len()).unwrap_or(u32::MAX),
            native_widget: std::ptr::null_mut(),
        };

        PANIC_HANDLER.call_once(|| unsafe { sys::register_panic_handler(Some(callbacks::on_panic)) });

        // The engine copies everything it keeps out of `init` before returning.
        match options.api {
            GraphicsBackend::OpenGlCore => unsafe {
                sys::init_with_gl(init, Some(callbacks::wakeup), callbacks::host_callbacks())
            },
            GraphicsBackend::Direct3D11 => unsafe {
                sys::init_with_egl(init, Some(callbacks::wakeup), callbacks::host_callbacks())
            },
            api => {
                return Err(EngineError::InitFailed(format!(
                    "no engine context for {api:?}"
                )))
            }
        }

        info!(window = %host.window(), api = ?options.api, size = %options.size, "engine started");
        Ok(Box::new(SimpleServo))
    }

    fn version(&self) -> Option<String> {
        let raw = unsafe { sys::servo_version() };
        if raw.is_null() {
            return None;
        }
        Some(unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned())
    }
}

/// Handle to the running engine. All state lives on the engine side.
struct SimpleServo;

impl Engine for SimpleServo {
    fn perform_updates(&mut self) {
        unsafe { sys::perform_updates() }
    }

    fn fill_gl_texture(&mut self, texture: u32, size: Size) {
        unsafe { sys::fill_gl_texture(texture, dim(size.width), dim(size.height)) }
    }

    fn resize(&mut self, size: Size) {
        unsafe { sys::resize(dim(size.width), dim(size.height)) }
    }

    fn mouse_move(&mut self, x: f32, y: f32) {
        unsafe { sys::mouse_move(x, y) }
    }

    fn mouse_down(&mut self, x: f32, y: f32, b: MouseButton) {
        unsafe { sys::mouse_down(x, y, button(b)) }
    }

    fn mouse_up(&mut self, x: f32, y: f32, b: MouseButton) {
        unsafe { sys::mouse_up(x, y, button(b)) }
    }

    fn click(&mut self, x: f32, y: f32) {
        unsafe { sys::click(x, y) }
    }

    fn scroll(&mut self, dx: i32, dy: i32, x: i32, y: i32) {
        unsafe { sys::scroll(dx, dy, x, y) }
    }

    // The C API has no keyboard entry points yet.
    fn key_down(&mut self, key: EngineKey) {
        debug!(?key, "key down not supported by engine binding");
    }

    fn key_up(&mut self, key: EngineKey) {
        debug!(?key, "key up not supported by engine binding");
    }

    fn load_uri(&mut self, uri: &str) -> bool {
        match CString::new(uri) {
            Ok(uri) => unsafe { sys::load_uri(uri.as_ptr()) },
            Err(_) => false,
        }
    }

    fn is_uri_valid(&self, uri: &str) -> bool {
        match CString::new(uri) {
            Ok(uri) => unsafe { sys::is_uri_valid(uri.as_ptr()) },
            Err(_) => false,
        }
    }

    fn reload(&mut self) {
        unsafe { sys::reload() }
    }

    fn refresh(&mut self) {
        unsafe { sys::refresh() }
    }

    fn stop(&mut self) {
        unsafe { sys::stop() }
    }

    fn go_back(&mut self) {
        unsafe { sys::go_back() }
    }

    fn go_forward(&mut self) {
        unsafe { sys::go_forward() }
    }

    fn deinit(&mut self) {
        unsafe { sys::deinit() }
    }
}
