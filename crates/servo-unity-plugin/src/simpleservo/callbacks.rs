//! `extern "C"` trampolines for the engine's callback table.
//!
//! The engine's callbacks carry no user data. Each trampoline resolves the
//! window currently holding the engine through the [`EngineSlot`] and
//! forwards to its [`EngineHost`]. Strings returned to the engine are kept
//! alive in statics until the next call replaces them.

use std::ffi::{c_char, c_int, c_uint, CString};
use std::sync::{Mutex, OnceLock};

use servo_unity_webview::{
    ContextMenuResult, DevtoolsState, EngineHost, EngineSlot, MediaPlaybackState, PromptResult,
};
use tracing::{debug, error};

use super::sys::{self, CContextMenuResult, CHostCallbacks, CPromptResult};
use crate::ffi::strings::{borrow_str, to_c_string};

static SLOT: OnceLock<EngineSlot> = OnceLock::new();
static CLIPBOARD: Mutex<Option<CString>> = Mutex::new(None);
static PROMPT_INPUT: Mutex<Option<CString>> = Mutex::new(None);

pub(super) fn bind_slot(slot: EngineSlot) {
    if SLOT.set(slot).is_err() {
        debug!("engine callbacks already bound");
    }
}

fn with_host<R>(callback: &'static str, f: impl FnOnce(&EngineHost) -> R) -> Option<R> {
    let result = SLOT.get().and_then(|slot| slot.with_active(f));
    if result.is_none() {
        debug!(callback, "engine callback with no active window");
    }
    result
}

/// Keep `text` alive for the engine and return its pointer.
fn retain(store: &Mutex<Option<CString>>, text: Option<String>) -> *const c_char {
    let mut store = store.lock().unwrap_or_else(|e| e.into_inner());
    *store = text.map(|t| to_c_string(&t));
    store.as_ref().map_or(std::ptr::null(), |s| s.as_ptr())
}

fn prompt(result: PromptResult) -> CPromptResult {
    match result {
        PromptResult::Dismissed => CPromptResult::Dismissed,
        PromptResult::Primary => CPromptResult::Primary,
        PromptResult::Secondary => CPromptResult::Secondary,
    }
}

pub(super) fn host_callbacks() -> CHostCallbacks {
    CHostCallbacks {
        on_load_started: Some(on_load_started),
        on_load_ended: Some(on_load_ended),
        on_title_changed: Some(on_title_changed),
        on_allow_navigation: Some(on_allow_navigation),
        on_url_changed: Some(on_url_changed),
        on_history_changed: Some(on_history_changed),
        on_animating_changed: Some(on_animating_changed),
        on_shutdown_complete: Some(on_shutdown_complete),
        on_ime_state_changed: Some(on_ime_state_changed),
        get_clipboard_contents: Some(get_clipboard_contents),
        set_clipboard_contents: Some(set_clipboard_contents),
        on_media_session_metadata: Some(on_media_session_metadata),
        on_media_session_playback_state_change: Some(on_media_session_playback_state_change),
        on_media_session_set_position_state: Some(on_media_session_set_position_state),
        prompt_alert: Some(prompt_alert),
        prompt_ok_cancel: Some(prompt_ok_cancel),
        prompt_yes_no: Some(prompt_yes_no),
        prompt_input: Some(prompt_input),
        on_devtools_started: Some(on_devtools_started),
        show_context_menu: Some(show_context_menu),
        on_log_output: Some(on_log_output),
    }
}

pub(super) extern "C" fn wakeup() {
    with_host("wakeup", EngineHost::wakeup);
}

pub(super) unsafe extern "C" fn on_panic(reason: *const c_char) {
    let reason = borrow_str(reason).unwrap_or_default();
    if with_host("on_panic", |h| h.on_panic(&reason)).is_none() {
        error!("engine panicked: {reason}");
    }
}

// =============================================================================
// PAGE STATE
// =============================================================================

extern "C" fn on_load_started() {
    with_host("on_load_started", EngineHost::on_load_started);
}

extern "C" fn on_load_ended() {
    with_host("on_load_ended", EngineHost::on_load_ended);
}

unsafe extern "C" fn on_title_changed(title: *const c_char) {
    let title = borrow_str(title).unwrap_or_default();
    with_host("on_title_changed", |h| h.on_title_changed(&title));
}

unsafe extern "C" fn on_allow_navigation(url: *const c_char) -> bool {
    let url = borrow_str(url).unwrap_or_default();
    with_host("on_allow_navigation", |h| h.on_allow_navigation(&url)).unwrap_or(true)
}

unsafe extern "C" fn on_url_changed(url: *const c_char) {
    let url = borrow_str(url).unwrap_or_default();
    with_host("on_url_changed", |h| h.on_url_changed(&url));
}

extern "C" fn on_history_changed(can_go_back: bool, can_go_forward: bool) {
    with_host("on_history_changed", |h| {
        h.on_history_changed(can_go_back, can_go_forward)
    });
}

extern "C" fn on_animating_changed(animating: bool) {
    with_host("on_animating_changed", |h| h.on_animating_changed(animating));
}

extern "C" fn on_shutdown_complete() {
    with_host("on_shutdown_complete", EngineHost::on_shutdown_complete);
}

extern "C" fn on_ime_state_changed(show: bool) {
    with_host("on_ime_state_changed", |h| h.on_ime_state_changed(show));
}

// =============================================================================
// CLIPBOARD
// =============================================================================

extern "C" fn get_clipboard_contents() -> *const c_char {
    let text = with_host("get_clipboard_contents", EngineHost::get_clipboard_contents).flatten();
    retain(&CLIPBOARD, text)
}

unsafe extern "C" fn set_clipboard_contents(contents: *const c_char) {
    let contents = borrow_str(contents).unwrap_or_default();
    with_host("set_clipboard_contents", |h| h.set_clipboard_contents(&contents));
}

// =============================================================================
// MEDIA SESSION
// =============================================================================

unsafe extern "C" fn on_media_session_metadata(
    title: *const c_char,
    album: *const c_char,
    artist: *const c_char,
) {
    let title = borrow_str(title).unwrap_or_default();
    let album = borrow_str(album).unwrap_or_default();
    let artist = borrow_str(artist).unwrap_or_default();
    with_host("on_media_session_metadata", |h| {
        h.on_media_session_metadata(&title, &artist, &album)
    });
}

extern "C" fn on_media_session_playback_state_change(state: c_int) {
    let state = match state {
        sys::C_PLAYBACK_PLAYING => MediaPlaybackState::Playing,
        sys::C_PLAYBACK_PAUSED => MediaPlaybackState::Paused,
        _ => MediaPlaybackState::None,
    };
    with_host("on_media_session_playback_state_change", |h| {
        h.on_media_session_playback_state_change(state)
    });
}

extern "C" fn on_media_session_set_position_state(duration: f64, position: f64, rate: f64) {
    with_host("on_media_session_set_position_state", |h| {
        h.on_media_session_set_position_state(duration, position, rate)
    });
}

// =============================================================================
// DIALOGS
// =============================================================================

unsafe extern "C" fn prompt_alert(message: *const c_char, trusted: bool) {
    let message = borrow_str(message).unwrap_or_default();
    with_host("prompt_alert", |h| h.prompt_alert(&message, trusted));
}

unsafe extern "C" fn prompt_ok_cancel(message: *const c_char, trusted: bool) -> CPromptResult {
    let message = borrow_str(message).unwrap_or_default();
    let result = with_host("prompt_ok_cancel", |h| h.prompt_ok_cancel(&message, trusted));
    prompt(result.unwrap_or(PromptResult::Dismissed))
}

unsafe extern "C" fn prompt_yes_no(message: *const c_char, trusted: bool) -> CPromptResult {
    let message = borrow_str(message).unwrap_or_default();
    let result = with_host("prompt_yes_no", |h| h.prompt_yes_no(&message, trusted));
    prompt(result.unwrap_or(PromptResult::Dismissed))
}

unsafe extern "C" fn prompt_input(
    message: *const c_char,
    default: *const c_char,
    trusted: bool,
) -> *const c_char {
    let message = borrow_str(message).unwrap_or_default();
    let default = borrow_str(default).unwrap_or_default();
    let answer = with_host("prompt_input", |h| h.prompt_input(&message, &default, trusted));
    retain(&PROMPT_INPUT, answer)
}

unsafe extern "C" fn show_context_menu(
    title: *const c_char,
    items_list: *const *const c_char,
    items_size: u32,
) {
    let title = borrow_str(title);
    let items: Vec<String> = if items_list.is_null() {
        Vec::new()
    } else {
        std::slice::from_raw_parts(items_list, items_size as usize)
            .iter()
            .map(|&item| borrow_str(item).unwrap_or_default().into_owned())
            .collect()
    };
    let result = with_host("show_context_menu", |h| h.show_context_menu(title.as_deref(), &items));

    let (result, item) = match result.unwrap_or(ContextMenuResult::Dismissed) {
        ContextMenuResult::Ignored => (CContextMenuResult::Ignored, 0),
        ContextMenuResult::Selected(item) => (CContextMenuResult::Selected, item),
        ContextMenuResult::Dismissed => (CContextMenuResult::Dismissed, 0),
    };
    sys::on_context_menu_closed(result, item);
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

extern "C" fn on_devtools_started(result: c_int, port: c_uint) {
    let state = if result == sys::C_DEVTOOLS_STARTED {
        DevtoolsState::Started { port }
    } else {
        DevtoolsState::Error
    };
    with_host("on_devtools_started", |h| h.on_devtools_started(state, ""));
}

unsafe extern "C" fn on_log_output(buffer: *const c_char, buffer_length: u32) {
    if buffer.is_null() {
        return;
    }
    let bytes = std::slice::from_raw_parts(buffer.cast::<u8>(), buffer_length as usize);
    let line = String::from_utf8_lossy(bytes);
    with_host("on_log_output", |h| h.on_log_output(&line));
}
