//! Logging bootstrap.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{SdkError, SdkResult};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install a `fmt` subscriber filtered by `RUST_LOG`, or by `default_filter`
/// when `RUST_LOG` is unset.
///
/// Fails if the filter is invalid or a global subscriber is already set.
pub fn init_logging(default_filter: &str) -> SdkResult<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(_) => EnvFilter::try_from_default_env().map_err(|e| e.to_string()),
        Err(_) => EnvFilter::try_new(default_filter).map_err(|e| e.to_string()),
    }
    .map_err(|e| SdkError::config(format!("invalid log filter: {}", e)))?;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .map_err(|e| SdkError::config(format!("logging already initialized: {}", e)))
}
