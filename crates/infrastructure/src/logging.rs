//! Tracing setup for test binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a global subscriber that writes through the test harness.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Only the first
/// call in a process installs anything; it returns `true` if this call did.
pub fn init_test_logging() -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init()
        .is_ok()
}
