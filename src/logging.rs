/// Structured logging setup.
///
/// The filter is taken from `HAZMON_LOG`, then `RUST_LOG`, then the
/// configured default level. Logs go to stderr so the printed text report
/// on stdout stays clean.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "HAZMON_LOG";

/// Resolves the filter directive without touching the global subscriber.
pub fn filter_for(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(default_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
