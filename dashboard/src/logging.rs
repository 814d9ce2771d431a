//! Logging setup for the dashboard binary.
//!
//! Events go to stderr so the rendered sections on stdout stay readable. The filter defaults to
//! `info` and can be replaced through `RUST_LOG`.
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to set the global tracing subscriber.
    #[error("failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber
pub fn init() -> Result<(), LoggingError> {
    let subscriber = Registry::default()
        .with(build_env_filter())
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
