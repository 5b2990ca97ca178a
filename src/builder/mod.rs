//! Builder layer for field and schema descriptors
//!
//! Builders enforce construction-time invariants (a declared type, ordered
//! bounds, at least one alternative) so the validator never has to.
//!
//! ```
//! use fieldschema::builder::{array, number, object, string, SchemaBuilder};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = SchemaBuilder::new()
//!     .field("name", string().required(true).min_length(1)?)?
//!     .field("address", object().field("city", string().required(true))?)?
//!     .field("scores", array().entry(number())?.entry(string())?)?
//!     .build();
//!
//! fieldschema::validate_schema(&schema, &json!({ "name": "Ada", "scores": [1, "two"] }))?;
//! # Ok(())
//! # }
//! ```

mod errors;
mod field;
mod schema;

pub use errors::{BuildError, BuildResult};
pub use field::{
    array, multiple, number, object, string, ArrayFieldBuilder, FieldBuilder, IntoField, MultiTypeFieldBuilder,
    NumberFieldBuilder, ObjectFieldBuilder, StringFieldBuilder,
};
pub use schema::SchemaBuilder;
