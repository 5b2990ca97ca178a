//! Builder error types
//!
//! These report misuse while constructing descriptors. They never describe
//! data, and a schema that was built successfully cannot produce them.

use thiserror::Error;

/// Builder errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("Missing field type.")]
    MissingType,

    #[error("'minLength' cannot be bigger than 'maxLength' ({min} > {max}).")]
    MinLengthAboveMax { min: usize, max: usize },

    #[error("'maxLength' cannot be smaller than 'minLength' ({max} < {min}).")]
    MaxLengthBelowMin { min: usize, max: usize },

    #[error("'minValue' cannot be bigger than 'maxValue' ({min} > {max}).")]
    MinValueAboveMax { min: f64, max: f64 },

    #[error("'maxValue' cannot be smaller than 'minValue' ({max} < {min}).")]
    MaxValueBelowMin { min: f64, max: f64 },

    #[error("'{bound}' must be a finite number, got {value}.")]
    NonFiniteBound { bound: &'static str, value: f64 },

    #[error("Multi-type field needs at least one alternative.")]
    NoAlternatives,
}

/// Result type for builder operations
pub type BuildResult<T> = Result<T, BuildError>;
