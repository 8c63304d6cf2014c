//! Single-instance guard for the embedded engine.

use std::sync::{Arc, Mutex, MutexGuard};

use servo_unity_common::{WindowError, WindowId};

use crate::host::EngineHost;

struct ActiveEngine {
    window: WindowId,
    host: EngineHost,
}

/// Which window, if any, currently drives the engine.
///
/// Only one engine instance may exist per process, and its C callbacks
/// carry no user data. Engine callbacks resolve their window through this
/// slot; a second window asking to activate while it is occupied is
/// refused with [`WindowError::EngineBusy`].
#[derive(Clone, Default)]
pub struct EngineSlot {
    active: Arc<Mutex<Option<ActiveEngine>>>,
}

impl EngineSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `host`'s window.
    pub fn try_activate(&self, host: EngineHost) -> Result<(), WindowError> {
        let mut active = self.lock();
        match active.as_ref() {
            Some(current) if current.window == host.window() => Ok(()),
            Some(current) => Err(WindowError::EngineBusy {
                active: current.window,
                requested: host.window(),
            }),
            None => {
                *active = Some(ActiveEngine {
                    window: host.window(),
                    host,
                });
                Ok(())
            }
        }
    }

    /// Free the slot if `window` holds it. Returns whether it did.
    pub fn release(&self, window: WindowId) -> bool {
        let mut active = self.lock();
        if active.as_ref().is_some_and(|a| a.window == window) {
            *active = None;
            true
        } else {
            false
        }
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.lock().as_ref().map(|a| a.window)
    }

    /// Run `f` against the active window's host. The slot lock is released
    /// before `f` runs, so `f` may re-enter the slot.
    pub fn with_active<R>(&self, f: impl FnOnce(&EngineHost) -> R) -> Option<R> {
        let host = self.lock().as_ref().map(|a| a.host.clone())?;
        Some(f(&host))
    }

    fn lock(&self) -> MutexGuard<'_, Option<ActiveEngine>> {
        self.active.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventQueue;
    use crate::host::WindowMetadata;
    use crate::session::UpdateFlags;

    fn host(id: u32) -> EngineHost {
        EngineHost::new(
            WindowId(id),
            0,
            Arc::new(EventQueue::new()),
            Arc::new(UpdateFlags::default()),
            Arc::new(Mutex::new(WindowMetadata::default())),
        )
    }

    #[test]
    fn second_activation_is_refused() {
        let slot = EngineSlot::new();
        slot.try_activate(host(1)).unwrap();

        let err = slot.try_activate(host(2)).unwrap_err();
        assert!(matches!(
            err,
            WindowError::EngineBusy {
                active: WindowId(1),
                requested: WindowId(2)
            }
        ));
        assert_eq!(slot.active_window(), Some(WindowId(1)));
    }

    #[test]
    fn reactivating_same_window_is_ok() {
        let slot = EngineSlot::new();
        slot.try_activate(host(1)).unwrap();
        slot.try_activate(host(1)).unwrap();
        assert_eq!(slot.active_window(), Some(WindowId(1)));
    }

    #[test]
    fn release_only_by_owner() {
        let slot = EngineSlot::new();
        slot.try_activate(host(1)).unwrap();
        assert!(!slot.release(WindowId(2)));
        assert!(slot.release(WindowId(1)));
        assert_eq!(slot.active_window(), None);
        slot.try_activate(host(2)).unwrap();
        assert_eq!(slot.active_window(), Some(WindowId(2)));
    }

    #[test]
    fn with_active_resolves_host_and_may_reenter() {
        let slot = EngineSlot::new();
        assert!(slot.with_active(|h| h.window()).is_none());

        slot.try_activate(host(5)).unwrap();
        let inner = slot.clone();
        let seen = slot.with_active(|h| (h.window(), inner.active_window()));
        assert_eq!(seen, Some((WindowId(5), Some(WindowId(5)))));
    }
}
