//! Engine callback target.
//!
//! The engine's callbacks carry no user data, so every callback resolves
//! the window that currently owns the engine through
//! [`crate::slot::EngineSlot`] and lands on that window's [`EngineHost`].
//! Callbacks may arrive on any engine thread: nothing here touches host
//! graphics resources, it only queues events and flips update flags.

use std::sync::{Arc, Mutex, MutexGuard};

use servo_unity_common::{BrowserEvent, BrowserEventKind, WindowId};
use servo_unity_platform::HostClipboard;
use tracing::{debug, error, info, warn};

use crate::events::EventQueue;
use crate::session::UpdateFlags;

/// Title and URL most recently reported by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowMetadata {
    pub title: String,
    pub url: String,
}

/// Answer to a confirm or yes/no dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResult {
    Dismissed,
    Primary,
    Secondary,
}

/// Answer to a context menu request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuResult {
    Ignored,
    Selected(u32),
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaPlaybackState {
    None,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevtoolsState {
    Started { port: u32 },
    Error,
}

/// Per-window receiver of engine callbacks. Cheap to clone.
#[derive(Clone)]
pub struct EngineHost {
    window: WindowId,
    uid_ext: i32,
    events: Arc<EventQueue>,
    flags: Arc<UpdateFlags>,
    metadata: Arc<Mutex<WindowMetadata>>,
    clipboard: HostClipboard,
}

impl EngineHost {
    pub fn new(
        window: WindowId,
        uid_ext: i32,
        events: Arc<EventQueue>,
        flags: Arc<UpdateFlags>,
        metadata: Arc<Mutex<WindowMetadata>>,
    ) -> Self {
        Self {
            window,
            uid_ext,
            events,
            flags,
            metadata,
            clipboard: HostClipboard,
        }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    fn queue(&self, event: BrowserEvent) {
        self.events.push(self.uid_ext, event);
    }

    fn metadata(&self) -> MutexGuard<'_, WindowMetadata> {
        self.metadata.lock().unwrap_or_else(|e| e.into_inner())
    }

    // =========================================================================
    // SCHEDULING
    // =========================================================================

    /// The engine has work and wants the next render tick to update.
    pub fn wakeup(&self) {
        self.flags.request_once();
    }

    pub fn on_animating_changed(&self, animating: bool) {
        debug!(window = %self.window, animating, "animating changed");
        self.flags.set_continuous(animating);
    }

    // =========================================================================
    // PAGE STATE
    // =========================================================================

    pub fn on_load_started(&self) {
        info!(window = %self.window, "load started");
        self.queue(BrowserEvent::load_state(true));
    }

    pub fn on_load_ended(&self) {
        info!(window = %self.window, "load ended");
        self.queue(BrowserEvent::load_state(false));
    }

    pub fn on_title_changed(&self, title: &str) {
        info!(window = %self.window, title, "title changed");
        self.metadata().title = title.to_string();
        self.queue(BrowserEvent::new(BrowserEventKind::TitleChanged));
    }

    pub fn on_url_changed(&self, url: &str) {
        info!(window = %self.window, url, "url changed");
        self.metadata().url = url.to_string();
        self.queue(BrowserEvent::new(BrowserEventKind::UrlChanged));
    }

    pub fn on_history_changed(&self, can_go_back: bool, can_go_forward: bool) {
        debug!(window = %self.window, can_go_back, can_go_forward, "history changed");
        self.queue(BrowserEvent::history(can_go_back, can_go_forward));
    }

    pub fn on_allow_navigation(&self, url: &str) -> bool {
        debug!(window = %self.window, url, "allowing navigation");
        true
    }

    pub fn on_shutdown_complete(&self) {
        info!(window = %self.window, "engine shutdown complete");
        self.queue(BrowserEvent::new(BrowserEventKind::Shutdown));
    }

    pub fn on_ime_state_changed(&self, show: bool) {
        debug!(window = %self.window, show, "ime state changed");
        self.queue(BrowserEvent::ime(show));
    }

    // =========================================================================
    // CLIPBOARD
    // =========================================================================

    pub fn get_clipboard_contents(&self) -> Option<String> {
        match self.clipboard.read_text() {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(window = %self.window, "clipboard read failed: {e}");
                None
            }
        }
    }

    pub fn set_clipboard_contents(&self, text: &str) {
        if let Err(e) = self.clipboard.write_text(text) {
            warn!(window = %self.window, "clipboard write failed: {e}");
        }
    }

    // =========================================================================
    // MEDIA SESSION
    // =========================================================================

    pub fn on_media_session_metadata(&self, title: &str, artist: &str, album: &str) {
        info!(window = %self.window, title, artist, album, "media session metadata");
    }

    pub fn on_media_session_playback_state_change(&self, state: MediaPlaybackState) {
        info!(window = %self.window, ?state, "media session playback state");
    }

    pub fn on_media_session_set_position_state(&self, duration: f64, position: f64, rate: f64) {
        debug!(window = %self.window, duration, position, rate, "media session position");
    }

    // =========================================================================
    // DIALOGS
    // =========================================================================

    pub fn prompt_alert(&self, message: &str, trusted: bool) {
        info!(window = %self.window, trusted, "alert: {message}");
    }

    pub fn prompt_ok_cancel(&self, message: &str, trusted: bool) -> PromptResult {
        info!(window = %self.window, trusted, "confirm dismissed: {message}");
        PromptResult::Dismissed
    }

    pub fn prompt_yes_no(&self, message: &str, trusted: bool) -> PromptResult {
        info!(window = %self.window, trusted, "yes/no dismissed: {message}");
        PromptResult::Dismissed
    }

    /// Answers with the page-supplied default.
    pub fn prompt_input(&self, message: &str, default: &str, trusted: bool) -> String {
        info!(window = %self.window, trusted, "input prompt: {message}");
        default.to_string()
    }

    pub fn show_context_menu(&self, title: Option<&str>, items: &[String]) -> ContextMenuResult {
        info!(
            window = %self.window,
            title = title.unwrap_or(""),
            items = items.len(),
            "context menu requested"
        );
        for (i, item) in items.iter().enumerate() {
            debug!(window = %self.window, index = i, "context menu item: {item}");
        }
        ContextMenuResult::Dismissed
    }

    // =========================================================================
    // DIAGNOSTICS
    // =========================================================================

    pub fn on_devtools_started(&self, state: DevtoolsState, token: &str) {
        match state {
            DevtoolsState::Started { port } => {
                info!(window = %self.window, port, token, "devtools server started")
            }
            DevtoolsState::Error => warn!(window = %self.window, "devtools server failed to start"),
        }
    }

    pub fn on_log_output(&self, line: &str) {
        info!(target: "engine", window = %self.window, "{}", line.trim_end());
    }

    pub fn on_panic(&self, reason: &str) {
        error!(window = %self.window, "engine panicked: {reason}");
    }

    /// Title and URL last reported for this window.
    pub fn snapshot(&self) -> WindowMetadata {
        self.metadata().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> (EngineHost, Arc<EventQueue>, Arc<UpdateFlags>) {
        let events = Arc::new(EventQueue::new());
        let flags = Arc::new(UpdateFlags::default());
        let host = EngineHost::new(
            WindowId(1),
            42,
            Arc::clone(&events),
            Arc::clone(&flags),
            Arc::new(Mutex::new(WindowMetadata::default())),
        );
        (host, events, flags)
    }

    #[test]
    fn load_callbacks_queue_events_with_external_id() {
        let (host, events, _) = host();
        host.on_load_started();
        host.on_load_ended();

        let first = events.pop().unwrap();
        assert_eq!(first.uid_ext, 42);
        assert_eq!(first.event, BrowserEvent::load_state(true));
        assert_eq!(events.pop().unwrap().event, BrowserEvent::load_state(false));
        assert!(events.pop().is_none());
    }

    #[test]
    fn title_and_url_update_metadata() {
        let (host, events, _) = host();
        host.on_title_changed("Mozilla");
        host.on_url_changed("https://mozilla.org/");

        assert_eq!(
            host.snapshot(),
            WindowMetadata {
                title: "Mozilla".into(),
                url: "https://mozilla.org/".into(),
            }
        );
        assert_eq!(events.pop().unwrap().event.kind, BrowserEventKind::TitleChanged);
        assert_eq!(events.pop().unwrap().event.kind, BrowserEventKind::UrlChanged);
    }

    #[test]
    fn history_and_ime_payloads() {
        let (host, events, _) = host();
        host.on_history_changed(true, false);
        host.on_ime_state_changed(true);
        host.on_shutdown_complete();

        let history = events.pop().unwrap().event;
        assert_eq!((history.data1, history.data2), (1, 0));
        assert_eq!(events.pop().unwrap().event, BrowserEvent::ime(true));
        assert_eq!(events.pop().unwrap().event.kind, BrowserEventKind::Shutdown);
    }

    #[test]
    fn wakeup_and_animating_drive_flags() {
        let (host, _, flags) = host();
        assert!(!flags.take());

        host.wakeup();
        assert!(flags.take());
        assert!(!flags.take());

        host.on_animating_changed(true);
        assert!(flags.take());
        assert!(flags.take());
        host.on_animating_changed(false);
        assert!(!flags.take());
    }

    #[test]
    fn dialogs_are_dismissed() {
        let (host, events, _) = host();
        assert_eq!(host.prompt_ok_cancel("sure?", true), PromptResult::Dismissed);
        assert_eq!(host.prompt_yes_no("really?", false), PromptResult::Dismissed);
        assert_eq!(host.prompt_input("name?", "anon", true), "anon");
        assert_eq!(
            host.show_context_menu(Some("menu"), &["Copy".into(), "Paste".into()]),
            ContextMenuResult::Dismissed
        );
        assert!(host.on_allow_navigation("https://example.org/"));
        assert!(events.is_empty());
    }
}
