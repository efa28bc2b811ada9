// src/log.rs
//
// Short logging macros used across the crate. They forward to `tracing`,
// so whatever subscriber the embedding program installs receives them.
// `init` wires a stderr subscriber for binaries, benches and tests.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

#[doc(hidden)]
pub use tracing as __tracing;

pub const DEFAULT_DIRECTIVE: &str = "rankchain=info";

static INIT: OnceLock<()> = OnceLock::new();

/// Install a fmt subscriber filtered by `RUST_LOG` (or `rankchain=info`).
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Length-only stand-in for values that must never reach a log line.
pub fn redact(secret: &str) -> String {
    format!("<{} bytes>", secret.len())
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::__tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::__tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::__tracing::error!($($arg)*)
    };
}
