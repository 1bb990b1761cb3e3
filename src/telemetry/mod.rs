//! Tracing initialization hooks.

use tracing_subscriber::{fmt, EnvFilter, prelude::*};

/// Initialize the global tracing subscriber with an env filter.
///
/// Use RUST_LOG to configure, e.g.:
/// RUST_LOG=debug,trap_backend=debug,tower_http=info
///
/// Safe to call more than once; later calls are no-ops so the endpoint
/// tests can each build an app without fighting over the global.
pub fn init() {
    let fmt_layer = fmt::layer()
        .with_target(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
