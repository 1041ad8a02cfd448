//! Tracing setup for binaries and tests
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to whoever owns `main`.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, or `default_level` when unset.
///
/// Returns false if a global subscriber was already installed.
pub fn init(default_level: Level) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
