//! Raw bindings to the embedded engine's C API (`simpleservo.h`).
//!
//! Enums the engine passes *into* callbacks are taken as plain integers;
//! only enums we hand back are declared as Rust enums.

use std::ffi::{c_char, c_int, c_uint, c_void};

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub enum CMouseButton {
    Left,
    Right,
    Middle,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub enum CPromptResult {
    Dismissed,
    Primary,
    Secondary,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub enum CContextMenuResult {
    Ignored,
    Selected,
    Dismissed,
}

pub const C_DEVTOOLS_STARTED: c_int = 0;

pub const C_PLAYBACK_PLAYING: c_int = 2;
pub const C_PLAYBACK_PAUSED: c_int = 3;

#[repr(C)]
pub struct CInitOptions {
    pub args: *const c_char,
    pub url: *const c_char,
    pub width: i32,
    pub height: i32,
    pub density: f32,
    pub enable_subpixel_text_antialiasing: bool,
    pub vslogger_mod_list: *const *const c_char,
    pub vslogger_mod_size: u32,
    pub native_widget: *mut c_void,
}

#[repr(C)]
pub struct CHostCallbacks {
    pub on_load_started: Option<extern "C" fn()>,
    pub on_load_ended: Option<extern "C" fn()>,
    pub on_title_changed: Option<unsafe extern "C" fn(title: *const c_char)>,
    pub on_allow_navigation: Option<unsafe extern "C" fn(url: *const c_char) -> bool>,
    pub on_url_changed: Option<unsafe extern "C" fn(url: *const c_char)>,
    pub on_history_changed: Option<extern "C" fn(can_go_back: bool, can_go_forward: bool)>,
    pub on_animating_changed: Option<extern "C" fn(animating: bool)>,
    pub on_shutdown_complete: Option<extern "C" fn()>,
    pub on_ime_state_changed: Option<extern "C" fn(show: bool)>,
    pub get_clipboard_contents: Option<extern "C" fn() -> *const c_char>,
    pub set_clipboard_contents: Option<unsafe extern "C" fn(contents: *const c_char)>,
    pub on_media_session_metadata: Option<
        unsafe extern "C" fn(title: *const c_char, album: *const c_char, artist: *const c_char),
    >,
    pub on_media_session_playback_state_change: Option<extern "C" fn(state: c_int)>,
    pub on_media_session_set_position_state:
        Option<extern "C" fn(duration: f64, position: f64, playback_rate: f64)>,
    pub prompt_alert: Option<unsafe extern "C" fn(message: *const c_char, trusted: bool)>,
    pub prompt_ok_cancel:
        Option<unsafe extern "C" fn(message: *const c_char, trusted: bool) -> CPromptResult>,
    pub prompt_yes_no:
        Option<unsafe extern "C" fn(message: *const c_char, trusted: bool) -> CPromptResult>,
    pub prompt_input: Option<
        unsafe extern "C" fn(message: *const c_char, default: *const c_char, trusted: bool) -> *const c_char,
    >,
    pub on_devtools_started: Option<extern "C" fn(result: c_int, port: c_uint)>,
    pub show_context_menu: Option<
        unsafe extern "C" fn(title: *const c_char, items_list: *const *const c_char, items_size: u32),
    >,
    pub on_log_output: Option<unsafe extern "C" fn(buffer: *const c_char, buffer_length: u32)>,
}

#[link(name = "simpleservo")]
extern "C" {
    pub fn init_with_gl(opts: CInitOptions, wakeup: Option<extern "C" fn()>, callbacks: CHostCallbacks);
    pub fn init_with_egl(opts: CInitOptions, wakeup: Option<extern "C" fn()>, callbacks: CHostCallbacks);
    pub fn deinit();
    pub fn register_panic_handler(on_panic: Option<unsafe extern "C" fn(reason: *const c_char)>);
    pub fn servo_version() -> *const c_char;

    pub fn perform_updates();
    pub fn fill_gl_texture(texture: c_uint, width: i32, height: i32);
    pub fn resize(width: i32, height: i32);

    pub fn mouse_move(x: f32, y: f32);
    pub fn mouse_down(x: f32, y: f32, button: CMouseButton);
    pub fn mouse_up(x: f32, y: f32, button: CMouseButton);
    pub fn click(x: f32, y: f32);
    pub fn scroll(dx: i32, dy: i32, x: i32, y: i32);

    pub fn load_uri(url: *const c_char) -> bool;
    pub fn is_uri_valid(url: *const c_char) -> bool;
    pub fn reload();
    pub fn refresh();
    pub fn stop();
    pub fn go_back();
    pub fn go_forward();

    pub fn on_context_menu_closed(result: CContextMenuResult, item: u32);
}
