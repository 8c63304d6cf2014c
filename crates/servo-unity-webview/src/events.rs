//! Browser events waiting for the host to poll them.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use servo_unity_common::BrowserEvent;

/// One queued notification, tagged with the host's window tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingBrowserEvent {
    pub uid_ext: i32,
    pub event: BrowserEvent,
}

/// FIFO of events produced by engine callbacks on any thread, consumed on
/// the host thread by `serviceWindowEvents`.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Mutex<VecDeque<PendingBrowserEvent>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, uid_ext: i32, event: BrowserEvent) {
        self.lock().push_back(PendingBrowserEvent { uid_ext, event });
    }

    pub fn pop(&self) -> Option<PendingBrowserEvent> {
        self.lock().pop_front()
    }

    /// Hand each queued event to `deliver` in order. Never waits for new
    /// events, and never holds the lock while `deliver` runs.
    pub fn drain_with(&self, mut deliver: impl FnMut(PendingBrowserEvent)) -> usize {
        let mut delivered = 0;
        while let Some(pending) = self.pop() {
            deliver(pending);
            delivered += 1;
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<PendingBrowserEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use servo_unity_common::BrowserEventKind;

    #[test]
    fn drains_in_fifo_order() {
        let queue = EventQueue::new();
        queue.push(7, BrowserEvent::load_state(true));
        queue.push(7, BrowserEvent::new(BrowserEventKind::TitleChanged));
        queue.push(7, BrowserEvent::load_state(false));

        let mut seen = Vec::new();
        let n = queue.drain_with(|p| seen.push(p.event));
        assert_eq!(n, 3);
        assert_eq!(
            seen,
            vec![
                BrowserEvent::load_state(true),
                BrowserEvent::new(BrowserEventKind::TitleChanged),
                BrowserEvent::load_state(false),
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn empty_drain_returns_immediately() {
        let queue = EventQueue::new();
        assert_eq!(queue.drain_with(|_| panic!("no events expected")), 0);
    }

    #[test]
    fn deliver_may_push_without_deadlock() {
        let queue = EventQueue::new();
        queue.push(1, BrowserEvent::ime(true));
        let mut pushed = false;
        let n = queue.drain_with(|_| {
            if !pushed {
                pushed = true;
                queue.push(1, BrowserEvent::ime(false));
            }
        });
        assert_eq!(n, 2);
    }
}
