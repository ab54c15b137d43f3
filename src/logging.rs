//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, after configuration is loaded.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("failed to set subscriber: {0}")]
    AlreadyInitialized(String),
}

/// Build the filter: `RUST_LOG` when set, `configured` otherwise.
///
/// A set but unparsable `RUST_LOG` is an error; it never falls back.
pub fn build_filter(configured: &str) -> Result<EnvFilter, LoggingError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(rust_log.as_deref(), configured)
}

fn filter_from(rust_log: Option<&str>, configured: &str) -> Result<EnvFilter, LoggingError> {
    let directives = rust_log.unwrap_or(configured);
    EnvFilter::try_new(directives).map_err(|e| LoggingError::InvalidFilter {
        filter: directives.to_string(),
        reason: e.to_string(),
    })
}

/// Initialise the global tracing subscriber, writing to stderr.
pub fn init(configured: &str) -> Result<(), LoggingError> {
    let filter = build_filter(configured)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}
