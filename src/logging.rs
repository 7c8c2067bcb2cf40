//! Tracing subscriber setup for host applications.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError};

/// Install a global subscriber filtered by `RUST_LOG`, or `default_filter`
/// when the variable is unset or invalid (e.g. `"errdiff=info"`).
///
/// Fails if a global subscriber is already installed.
pub fn init(default_filter: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .try_init()
}
