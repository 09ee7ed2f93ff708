//! Tracing subscriber setup for the binary.
//!
//! The library only emits `tracing` events; installing a subscriber is
//! left to whoever embeds it.  `LOCALVAULT_LOG` takes precedence over the
//! configured default filter.  Logs go to stderr so command output on
//! stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "LOCALVAULT_LOG";

/// Install the global fmt subscriber.  Calling it twice is harmless.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
