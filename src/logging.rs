//! Logging configuration using tracing

use tracing_subscriber::{EnvFilter, fmt, prelude::*, util::TryInitError};

/// Initialize logging to stderr; stdout carries the directory selection.
///
/// Log level is controlled by the `VIMI_LOG` environment variable.
///
/// # Examples
/// ```bash
/// VIMI_LOG=debug vimi ~/src
/// ```
pub fn init() -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_env("VIMI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init()
}
