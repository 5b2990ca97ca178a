//! Observable events emitted during schema construction and validation
//!
//! Events are explicit and typed. Each log record carries the event's
//! stable name in its `event` field.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Validator configuration loaded from disk
    ConfigLoaded,

    // Construction
    /// Schema materialized by the builder
    SchemaBuilt,

    // Validation
    /// Validation of a data document begins
    ValidationStart,
    /// Data document accepted
    ValidationComplete,
    /// Data document rejected
    ValidationFailed,
    /// A union or multi-type candidate rejected a value; the next one is tried
    CandidateRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaBuilt => "SCHEMA_BUILT",
            Event::ValidationStart => "VALIDATION_START",
            Event::ValidationComplete => "VALIDATION_COMPLETE",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::CandidateRejected => "CANDIDATE_REJECTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
