use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, ThreadId};

use servo_unity_config::LogLevel;

/// Host log callback. Receives one formatted line, or a batch of buffered
/// lines when flushing.
pub type LogCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Room kept free at the end of the wrong-thread buffer for the `...`
/// overflow marker and the host's terminating nul.
const OVERFLOW_RESERVE: usize = 4;
const OVERFLOW_MARKER: &str = "...";

pub const DEFAULT_OVERFLOW_BYTES: usize = 4096;

struct SinkState {
    callback: Option<LogCallback>,
    owner: Option<ThreadId>,
    same_thread_only: bool,
    level: LogLevel,
    pending: String,
    capacity: usize,
    full: bool,
}

/// Process-wide log destination for the host.
///
/// When same-thread-only delivery is on, lines produced on any thread
/// other than the one that registered the callback are held in a bounded
/// buffer and handed over before the next same-thread line, or on
/// [`LogSink::flush`]. The callback is never invoked with the lock held.
pub struct LogSink {
    state: Mutex<SinkState>,
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(DEFAULT_OVERFLOW_BYTES)
    }
}

impl LogSink {
    pub fn new(overflow_bytes: usize) -> Self {
        Self {
            state: Mutex::new(SinkState {
                callback: None,
                owner: None,
                same_thread_only: false,
                level: LogLevel::default(),
                pending: String::new(),
                capacity: overflow_bytes.max(OVERFLOW_RESERVE),
                full: false,
            }),
        }
    }

    /// Install or clear the host callback. The calling thread becomes the
    /// delivery thread when `same_thread_only` is set.
    pub fn register(&self, callback: Option<LogCallback>, same_thread_only: bool) {
        let mut state = self.lock();
        let buffered = callback.is_some() && same_thread_only;
        state.owner = buffered.then(|| thread::current().id());
        state.same_thread_only = buffered;
        state.callback = callback;
        if !buffered {
            state.pending.clear();
            state.full = false;
        }
    }

    pub fn has_callback(&self) -> bool {
        self.lock().callback.is_some()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.lock().level = level;
    }

    pub fn level(&self) -> LogLevel {
        self.lock().level
    }

    /// Resize the wrong-thread buffer. Anything already buffered is kept.
    pub fn set_overflow_capacity(&self, bytes: usize) {
        self.lock().capacity = bytes.max(OVERFLOW_RESERVE);
    }

    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.lock().level
    }

    /// Deliver one message at `level`. Returns `false` when there is no
    /// callback to deliver to, or the message is below the threshold.
    pub fn write(&self, level: LogLevel, message: &str) -> bool {
        if message.is_empty() {
            return false;
        }
        let line = format_line(level, message);

        let (callback, backlog) = {
            let mut state = self.lock();
            if level < state.level {
                return false;
            }
            let Some(callback) = state.callback.clone() else {
                return false;
            };

            if state.same_thread_only && state.owner != Some(thread::current().id()) {
                state.buffer(&line);
                return true;
            }

            let backlog = state.take_pending();
            (callback, backlog)
        };

        if let Some(backlog) = backlog {
            callback(&backlog);
        }
        callback(&line);
        true
    }

    /// Hand buffered wrong-thread lines to the callback. Does nothing when
    /// called from a thread other than the registering one.
    pub fn flush(&self) {
        let (callback, backlog) = {
            let mut state = self.lock();
            if state.same_thread_only && state.owner != Some(thread::current().id()) {
                return;
            }
            let Some(callback) = state.callback.clone() else {
                return;
            };
            let Some(backlog) = state.take_pending() else {
                return;
            };
            (callback, backlog)
        };
        callback(&backlog);
    }

    /// Bytes currently waiting in the wrong-thread buffer.
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    fn lock(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SinkState {
    fn buffer(&mut self, line: &str) {
        if self.full {
            return;
        }
        let used = self.pending.len() + OVERFLOW_RESERVE;
        if line.len() <= self.capacity.saturating_sub(used) {
            self.pending.push_str(line);
        } else {
            self.pending.push_str(OVERFLOW_MARKER);
            self.full = true;
        }
    }

    fn take_pending(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        self.full = false;
        Some(std::mem::take(&mut self.pending))
    }
}

/// `"[level] message\n"`.
pub fn format_line(level: LogLevel, message: &str) -> String {
    let mut line = format!("[{}] {message}", level.label());
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}
