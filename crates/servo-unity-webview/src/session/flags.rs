use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Flags {
    once: bool,
    continuously: bool,
}

/// Whether the next render tick must pull a frame from the engine.
///
/// Set from engine threads (`wakeup`, animating changes), consumed on the
/// render thread.
#[derive(Debug, Default)]
pub struct UpdateFlags {
    flags: Mutex<Flags>,
}

impl UpdateFlags {
    pub fn request_once(&self) {
        self.lock().once = true;
    }

    pub fn set_continuous(&self, on: bool) {
        self.lock().continuously = on;
    }

    /// Returns whether an update is due, consuming a one-shot request.
    pub fn take(&self) -> bool {
        let mut flags = self.lock();
        let due = flags.once || flags.continuously;
        flags.once = false;
        due
    }

    pub fn clear(&self) {
        *self.lock() = Flags::default();
    }

    fn lock(&self) -> MutexGuard<'_, Flags> {
        self.flags.lock().unwrap_or_else(|e| e.into_inner())
    }
}
