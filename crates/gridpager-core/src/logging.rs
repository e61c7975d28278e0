#![forbid(unsafe_code)]

//! Structured logging hooks.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros. Without it, the same macro names expand to nothing so call sites
//! never need their own `#[cfg]` guards. Either way the macros are reachable
//! from the crate root:
//!
//! ```ignore
//! use gridpager_core::debug;
//!
//! debug!(target: "gridpager.drag", axis = ?axis, "axis locked");
//! ```
//!
//! The `tracing-json` feature adds [`init_json_subscriber`], a one-call setup
//! for production hosts that ship logs as JSON lines.

#[cfg(feature = "tracing")]
pub use tracing::{debug, error, info, trace, warn};

/// No-op `debug!` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

/// No-op `info!` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{}};
}

/// No-op `trace!` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}

/// No-op `warn!` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{}};
}

/// No-op `error!` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{}};
}

/// Install a global JSON subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
