//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Log level comes from `RUST_LOG`; defaults to `info` for this crate.
/// Call once, from the binary entrypoint.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "external_config=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
