//! Host-facing log output.
//!
//! [`LogSink`] holds the host callback, the level threshold and the
//! wrong-thread buffer. [`HostLogLayer`] feeds it from `tracing`.

mod layer;
mod sink;

#[cfg(test)]
mod tests;

pub use layer::{host_level, HostLogLayer};
pub use sink::{format_line, LogCallback, LogSink, DEFAULT_OVERFLOW_BYTES};
