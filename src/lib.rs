//! fieldschema - declarative field schemas for loosely-typed JSON data
//!
//! A `Schema` describes nested objects, tuple and union arrays, scalars and
//! multi-type fields. `validate_schema` walks a JSON document against it and
//! fails with a path-qualified error at the first mismatch.
//!
//! ```
//! use fieldschema::builder::{object, string, SchemaBuilder};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = SchemaBuilder::new()
//!     .field("address", object().field("city", string().required(true))?)?
//!     .build();
//!
//! fieldschema::validate_schema(&schema, &json!({ "address": { "city": "Oslo" } }))?;
//! # Ok(())
//! # }
//! ```
//!
//! Runtime type names follow JSON: a `null` value is reported as `null`, not
//! `object`, and a missing value as `undefined`.
//! Dumped values keep their document key order.

pub mod builder;
pub mod config;
pub mod observability;
pub mod schema;

pub use builder::{BuildError, SchemaBuilder};
pub use config::ValidatorConfig;
pub use schema::{validate_field, validate_schema, FieldDef, Schema, SchemaError, SchemaValidator, ValidationError};
