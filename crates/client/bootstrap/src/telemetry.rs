//! Tracing setup shared by front-ends and integration tests.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Respects `RUST_LOG`, defaulting to `info`. Logs go to stderr so a
/// terminal front-end keeps stdout for itself. Safe to call more than once;
/// later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
