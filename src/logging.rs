//! Diagnostic logging setup
//!
//! Library code only emits `tracing` events. The binary installs a
//! subscriber that writes them to stderr, filtered by `TALLY_LOG` (same
//! syntax as `RUST_LOG`) or, if that is unset, by the `-v` count.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "TALLY_LOG";

/// Default filter for a given number of `-v` flags
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the stderr subscriber
///
/// Safe to call more than once; only the first call installs anything.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
