//! Tracing setup for the `u-assign` binary.
//!
//! The library only emits events; installing a subscriber is left to the
//! binary. `RUST_LOG`, when set, takes precedence over the level flag.

use tracing_subscriber::{fmt, EnvFilter};

/// Builds the filter: `RUST_LOG` if set, otherwise `u_assign=<level>`.
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("u_assign={log_level}")))
}

/// Installs a compact stderr subscriber.
///
/// Stdout is reserved for the JSON response.
pub fn init_tracing(log_level: &str) {
    fmt()
        .with_env_filter(env_filter(log_level))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
