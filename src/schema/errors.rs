//! Schema validation error types
//!
//! Error codes:
//! - SCHEMA_VALIDATION_FAILED: data does not match the declared shape
//! - SCHEMA_MALFORMED_TUPLE: a positional tuple slot is missing or not an array
//!
//! Only `ValidationError` describes bad data. `MalformedTuple` signals an
//! integration mistake and is not meant to be recovered from.

use std::fmt;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use thiserror::Error;

use super::resolve::TypeName;

/// Marker prefixed to every line of a rendered value
const DUMP_MARKER: &str = ">>  ";

/// Schema error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Data violates the schema
    ValidationFailed,
    /// Tuple data is not shaped as nested arrays
    MalformedTuple,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::ValidationFailed => "SCHEMA_VALIDATION_FAILED",
            SchemaErrorCode::MalformedTuple => "SCHEMA_MALFORMED_TUPLE",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A data-shape mismatch at a specific path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ValidationError <{path}>: {message}")]
pub struct ValidationError {
    /// Dotted/bracketed path from the schema root (e.g. `address.city`, `tags[2]`)
    pub path: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual type or value found
    pub received: String,
    /// Human-readable description including a dump of the offending value
    pub message: String,
}

impl ValidationError {
    /// Builds the error raised when a value's type differs from the declared one.
    ///
    /// ```text
    /// Required string, received object.
    /// >>  city: {
    /// >>      "name": "Oslo"
    /// >>  }
    /// ```
    pub fn type_mismatch(
        path: impl Into<String>,
        expected: TypeName,
        received: TypeName,
        value: Option<&Value>,
    ) -> Self {
        Self::describe(path.into(), expected.to_string(), received.to_string(), value)
    }

    /// Builds the error raised when a scalar falls outside its declared bounds.
    pub fn out_of_bounds(
        path: impl Into<String>,
        expected: impl Into<String>,
        received: impl Into<String>,
        value: Option<&Value>,
    ) -> Self {
        Self::describe(path.into(), expected.into(), received.into(), value)
    }

    fn describe(path: String, expected: String, received: String, value: Option<&Value>) -> Self {
        let message = format!(
            "Required {}, received {}.\n{}{}: {}",
            expected,
            received,
            DUMP_MARKER,
            last_segment(&path),
            render_value(value),
        );
        Self {
            path,
            expected,
            received,
            message,
        }
    }

    /// Error name carrying the failing path, e.g. `ValidationError <address.city>`
    pub fn name(&self) -> String {
        format!("ValidationError <{}>", self.path)
    }
}

/// Schema error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Field '{path}' must be an array.")]
    MalformedTuple { path: String },
}

impl SchemaError {
    pub fn malformed_tuple(path: impl Into<String>) -> Self {
        SchemaError::MalformedTuple { path: path.into() }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        match self {
            SchemaError::Validation(_) => SchemaErrorCode::ValidationFailed,
            SchemaError::MalformedTuple { .. } => SchemaErrorCode::MalformedTuple,
        }
    }

    /// Path at which the failure occurred
    pub fn path(&self) -> &str {
        match self {
            SchemaError::Validation(e) => &e.path,
            SchemaError::MalformedTuple { path } => path,
        }
    }

    /// Returns validation details if this is a data mismatch
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            SchemaError::Validation(e) => Some(e),
            SchemaError::MalformedTuple { .. } => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.as_validation().is_some()
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Trailing `.`-separated segment of a path
fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Pretty-prints a value with 4-space indentation, every line after the
/// first prefixed with the dump marker.
fn render_value(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return TypeName::Undefined.to_string();
    };

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    let pretty = match value.serialize(&mut ser) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    };

    pretty.replace('\n', &format!("\n{}", DUMP_MARKER))
}
