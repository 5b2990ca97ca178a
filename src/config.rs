//! Validator configuration
//!
//! Every option defaults to the established validation behavior. The
//! alternatives are opt-in:
//!
//! ```json
//! {
//!     "absence": "missing",
//!     "union_errors": "first_failing",
//!     "multi_type": "first_match",
//!     "enforce_bounds": true
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Event;

/// Which values let a non-required field skip validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsencePolicy {
    /// Absent, null, false, zero and the empty string all count as absent
    #[default]
    Falsy,
    /// Only absent and null count as absent
    Missing,
}

/// Which element a union array reports when candidates are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnionErrorReport {
    /// One tentative error is kept across all elements and cleared by any
    /// accepted element; it is reported after the last element.
    #[default]
    LastUnresolved,
    /// Stop at the first element that no candidate accepts
    FirstFailing,
}

/// How multi-type fields are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiTypeMode {
    /// The value must satisfy one alternative, tried in declared order
    #[default]
    FirstMatch,
    /// Present values are accepted without looking at the alternatives
    Unchecked,
}

/// Validator configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    pub absence: AbsencePolicy,
    pub union_errors: UnionErrorReport,
    pub multi_type: MultiTypeMode,
    /// Check string lengths and number values against declared bounds
    pub enforce_bounds: bool,
}

impl ValidatorConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json(&content)?;
        tracing::debug!(
            event = Event::ConfigLoaded.as_str(),
            path = %path.display(),
            ?config,
            "validator config loaded"
        );
        Ok(config)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn with_absence(mut self, absence: AbsencePolicy) -> Self {
        self.absence = absence;
        self
    }

    pub fn with_union_errors(mut self, union_errors: UnionErrorReport) -> Self {
        self.union_errors = union_errors;
        self
    }

    pub fn with_multi_type(mut self, multi_type: MultiTypeMode) -> Self {
        self.multi_type = multi_type;
        self
    }

    pub fn with_enforce_bounds(mut self, enforce_bounds: bool) -> Self {
        self.enforce_bounds = enforce_bounds;
        self
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
