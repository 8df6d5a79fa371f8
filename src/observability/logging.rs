//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when present; otherwise the default level follows the
/// runtime environment (debug in development, info in production).
pub fn init(debug: bool) {
    let fallback = if debug {
        "pricing_cell=debug,tower_http=debug"
    } else {
        "pricing_cell=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
