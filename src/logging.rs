//! Logging setup
//!
//! Installs the process-wide `tracing` subscriber.

use tracing_subscriber::EnvFilter;

/// Initialise logging. Debug logging defaults to `debug` level and honours
/// `RUST_LOG`; otherwise the level is pinned to `info`.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
