//! Type resolution for descriptors and runtime values
//!
//! Validation compares the type name a descriptor declares with the type name
//! of the value found in the data. Both sides resolve to a `TypeName`.

use std::fmt;

use serde_json::Value;

use super::types::{FieldDef, ScalarKind};

/// Semantic type name shared by descriptors and runtime values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    String,
    Number,
    Object,
    Array,
    /// Descriptor carrying alternatives rather than a single type
    Multiple,
    Boolean,
    Null,
    /// No value present at all
    Undefined,
}

impl TypeName {
    /// Returns the type name for error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::String => "string",
            TypeName::Number => "number",
            TypeName::Object => "object",
            TypeName::Array => "array",
            TypeName::Multiple => "multiple",
            TypeName::Boolean => "boolean",
            TypeName::Null => "null",
            TypeName::Undefined => "undefined",
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the type name of a runtime value; `None` is an absent value.
///
/// `null` gets its own name, so an object field given `null` is reported as
/// `received null` and is never descended into.
pub fn value_type(value: Option<&Value>) -> TypeName {
    match value {
        None => TypeName::Undefined,
        Some(Value::Array(_)) => TypeName::Array,
        Some(Value::Object(_)) => TypeName::Object,
        Some(Value::String(_)) => TypeName::String,
        Some(Value::Number(_)) => TypeName::Number,
        Some(Value::Bool(_)) => TypeName::Boolean,
        Some(Value::Null) => TypeName::Null,
    }
}

/// Resolves the type name a descriptor expects.
pub fn field_type(field: &FieldDef) -> TypeName {
    match field {
        FieldDef::MultiType(_) => TypeName::Multiple,
        FieldDef::Scalar(scalar) => match scalar.kind {
            ScalarKind::String(_) => TypeName::String,
            ScalarKind::Number(_) => TypeName::Number,
        },
        FieldDef::Array(_) => TypeName::Array,
        FieldDef::Object(_) => TypeName::Object,
    }
}

/// Whether a value counts as "not present" under the broad falsy policy:
/// absent, `null`, `false`, zero, or the empty string.
///
/// Empty arrays and objects are present.
pub fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}
