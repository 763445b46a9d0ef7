//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with a fallback filter used when `RUST_LOG` is unset
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing_with(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
