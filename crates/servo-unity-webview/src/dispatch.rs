//! Render-event staging.
//!
//! The host's render callback carries only an event id. The window index
//! and time delta are staged here just before the host fires the event,
//! and read back when it arrives on the render thread. Staging and firing
//! must come from the same thread, back to back; nothing here guards
//! against a second caller staging in between.

use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use servo_unity_common::WindowId;
use tracing::warn;

use crate::registry::WindowRegistry;

pub const RENDER_EVENT_UPDATE: i32 = 1;
pub const RENDER_EVENT_CLEANUP: i32 = 2;

#[derive(Debug, Default)]
pub struct RenderDispatch {
    update_window: AtomicI32,
    /// `f32` bit pattern.
    update_time_delta: AtomicU32,
    cleanup_window: AtomicI32,
}

impl RenderDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage_update(&self, window: i32, time_delta: f32) {
        self.update_window.store(window, Ordering::Relaxed);
        self.update_time_delta.store(time_delta.to_bits(), Ordering::Relaxed);
    }

    pub fn stage_cleanup(&self, window: i32) {
        self.cleanup_window.store(window, Ordering::Relaxed);
    }

    pub fn staged_update(&self) -> (i32, f32) {
        (
            self.update_window.load(Ordering::Relaxed),
            f32::from_bits(self.update_time_delta.load(Ordering::Relaxed)),
        )
    }

    pub fn staged_cleanup(&self) -> i32 {
        self.cleanup_window.load(Ordering::Relaxed)
    }

    /// Run the operation for `event_id` against the staged window.
    pub fn dispatch(&self, event_id: i32, registry: &WindowRegistry) {
        match event_id {
            RENDER_EVENT_UPDATE => {
                let (window, time_delta) = self.staged_update();
                registry.request_update(WindowId::from_raw(window), time_delta);
            }
            RENDER_EVENT_CLEANUP => {
                registry.cleanup_renderer(WindowId::from_raw(self.staged_cleanup()));
            }
            other => warn!(event_id = other, "unknown render event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use servo_unity_common::{DeviceEvent, Size};

    use super::*;
    use crate::device::DeviceLifecycle;
    use crate::testing::{context, Call, FakeProvider, RecordingFactory};

    fn registry(factory: &Arc<RecordingFactory>) -> WindowRegistry {
        let device = Arc::new(DeviceLifecycle::new());
        device.on_event(DeviceEvent::Initialize, &FakeProvider::gl());
        WindowRegistry::new(context(factory), device)
    }

    #[test]
    fn staged_values_round_trip() {
        let dispatch = RenderDispatch::new();
        dispatch.stage_update(3, 0.25);
        dispatch.stage_cleanup(4);
        assert_eq!(dispatch.staged_update(), (3, 0.25));
        assert_eq!(dispatch.staged_cleanup(), 4);
    }

    #[test]
    fn update_then_cleanup_events() {
        let factory = RecordingFactory::new();
        let registry = registry(&factory);
        let id = registry.request_new_window(0, Size::new(8, 8)).unwrap();
        let dispatch = RenderDispatch::new();

        dispatch.stage_update(id.as_raw(), 0.016);
        dispatch.dispatch(RENDER_EVENT_UPDATE, &registry);
        assert_eq!(factory.start_count(), 1);

        dispatch.stage_cleanup(id.as_raw());
        dispatch.dispatch(RENDER_EVENT_CLEANUP, &registry);
        assert_eq!(factory.log.calls(), vec![Call::Deinit]);
    }

    #[test]
    fn unknown_event_and_window_are_ignored() {
        let factory = RecordingFactory::new();
        let registry = registry(&factory);
        let dispatch = RenderDispatch::new();

        dispatch.dispatch(7, &registry);
        dispatch.stage_update(-1, 0.0);
        dispatch.dispatch(RENDER_EVENT_UPDATE, &registry);
        assert_eq!(factory.start_count(), 0);
    }
}
