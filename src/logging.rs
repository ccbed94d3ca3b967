//! `tracing` subscriber setup.
//!
//! Events go to stderr so they never interleave with transcript output on
//! stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from `directive`, then `RUST_LOG`, then [`DEFAULT_FILTER`].
pub fn build_filter(directive: Option<&str>) -> EnvFilter {
    if let Some(filter) = directive.and_then(|value| EnvFilter::try_new(value).ok()) {
        return filter;
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_logging(directive: Option<&str>) {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(build_filter(directive))
        .with(console_layer)
        .try_init()
        .ok();
}
