//! Observability for fieldschema
//!
//! Library code emits `tracing` events at `debug` and `trace` level, each
//! tagged with a stable [`Event`] name. Nothing is printed unless the host
//! installs a subscriber; [`init_json_logging`] installs a JSON one.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. Logging never changes a validation outcome
//! 3. No background threads
//!
//! # Usage
//!
//! ```no_run
//! use fieldschema::observability::init_json_logging;
//!
//! # fn main() -> Result<(), fieldschema::observability::ObservabilityError> {
//! init_json_logging("fieldschema=debug")?;
//! # Ok(())
//! # }
//! ```

mod events;

pub use events::Event;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Observability errors are never fatal to validation.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;

/// Installs a global JSON log subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter` when set. Fails if a
/// global subscriber is already installed.
pub fn init_json_logging(default_filter: &str) -> ObservabilityResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(default_filter)?,
    };

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| ObservabilityError::Install(e.to_string()))
}

fn parse_filter(filter: &str) -> ObservabilityResult<EnvFilter> {
    EnvFilter::try_new(filter).map_err(|e| ObservabilityError::InvalidFilter {
        filter: filter.to_string(),
        reason: e.to_string(),
    })
}
