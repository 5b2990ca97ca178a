//! Schema subsystem for fieldschema
//!
//! A `Schema` maps field names to `FieldDef` descriptors. The validator walks
//! a descriptor tree and a JSON value tree in lock-step and reports the first
//! mismatch with its full path.
//!
//! # Design Principles
//!
//! - Descriptors are plain data, built once and never mutated by validation
//! - No coercion of mismatched types
//! - First failure aborts; errors are not aggregated
//! - Deterministic: the same schema and data always give the same outcome

mod errors;
mod resolve;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, ValidationError};
pub use resolve::{field_type, is_falsy, value_type, TypeName};
pub use types::{
    ArrayField, FieldDef, FieldMap, MultiTypeField, NumberBounds, ObjectField, ScalarField, ScalarKind, Schema,
    StringBounds,
};
pub use validator::{validate_field, validate_schema, SchemaValidator};
