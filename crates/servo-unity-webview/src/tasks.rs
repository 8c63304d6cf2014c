//! Work queued for execution inside the engine's context.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::engine::Engine;

/// A deferred engine call.
pub type PendingTask = Box<dyn FnOnce(&mut dyn Engine) + Send>;

/// FIFO of pending tasks. Any thread may push; only the render thread pops.
///
/// The lock is held only to push or pop one entry, never while a task runs.
#[derive(Default)]
pub struct TaskQueue {
    tasks: Mutex<VecDeque<PendingTask>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, task: PendingTask) {
        self.lock().push_back(task);
    }

    pub fn pop(&self) -> Option<PendingTask> {
        self.lock().pop_front()
    }

    /// Run every queued task in order, including tasks queued by tasks.
    /// Returns how many ran.
    pub fn drain_into(&self, engine: &mut dyn Engine) -> usize {
        let mut ran = 0;
        while let Some(task) = self.pop() {
            task(engine);
            ran += 1;
        }
        ran
    }

    /// Drop every unexecuted task.
    pub fn clear(&self) -> usize {
        let mut tasks = self.lock();
        let dropped = tasks.len();
        tasks.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<PendingTask>> {
        self.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }
}
