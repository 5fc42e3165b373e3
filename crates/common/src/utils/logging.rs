use std::io;
use tracing_subscriber::{fmt, EnvFilter};

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the process-wide tracing subscriber with compact stdout output.
///
/// `RUST_LOG` wins when set; otherwise handlers, tower-http and axum log at
/// `info`. Calling this more than once is a no-op, so tests can call it freely.
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter("info,tower_http=info,axum=info"))
        .with_target(false)
        .compact()
        .with_writer(|| io::stdout())
        .try_init();
}

/// Same as [`init_logging_default`] but with JSON structured output, for
/// container environments where logs are machine-collected.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(env_filter("info"))
        .with_target(false)
        .json()
        .with_writer(|| io::stdout())
        .try_init();
}
