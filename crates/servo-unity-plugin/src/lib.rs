//! Native plugin exposing embedded browser windows to a Unity host.
//!
//! The host talks to the plugin through the flat C ABI in [`ffi`] and the
//! Unity native plugin interface in [`unity`]. Both are thin: they decode
//! raw arguments, log anything malformed, and forward to the process-wide
//! [`Plugin`].

pub mod ffi;
pub mod gl_context;
pub mod logging;
pub mod plugin;
pub mod unity;

#[cfg(windows)]
pub mod d3d11;

#[cfg(feature = "simpleservo")]
pub mod simpleservo;

pub use plugin::{plugin, Plugin, PLUGIN_VERSION};
