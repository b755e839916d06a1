//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs a stderr subscriber.
///
/// `RUST_LOG` wins when set. Otherwise each `-v` raises the level
/// (info, debug, trace), and without `-v` the configured level applies.
pub fn init(verbosity: u8, configured_level: &str) {
    let level = match verbosity {
        0 => configured_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A subscriber may already be installed when running under a test harness.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
