//! Tracing subscriber setup for the `dashboard-server` binary.
//!
//! Filter priority, highest first: `DASHBOARD_LOG`, `RUST_LOG`, then `info`.

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "DASHBOARD_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init_tracing() {
    let stderr_is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(stderr_is_tty)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(std::env::var(LOG_ENV).ok()))
        .with(fmt_layer)
        .try_init();
}

fn build_env_filter(directives: Option<String>) -> EnvFilter {
    // An unparseable DASHBOARD_LOG falls through instead of failing startup.
    if let Some(filter) = directives.and_then(|d| EnvFilter::try_new(d).ok()) {
        return filter;
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(DEFAULT_DIRECTIVE)
}
