//! Schema builder
//!
//! Collects named fields into a `Schema`. Validation goes through the same
//! engine as `schema::validate_schema`.

use serde_json::Value;

use super::errors::BuildResult;
use super::field::IntoField;
use crate::observability::Event;
use crate::schema::{Schema, SchemaResult, SchemaValidator};

/// Fluent constructor for a `Schema`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) one field
    pub fn field(mut self, name: impl Into<String>, field: impl IntoField) -> BuildResult<Self> {
        self.schema.fields_mut().insert(name, field.into_field()?);
        Ok(self)
    }

    /// Adds (or replaces) several fields, in iteration order
    pub fn fields<I, K, F>(self, fields: I) -> BuildResult<Self>
    where
        I: IntoIterator<Item = (K, F)>,
        K: Into<String>,
        F: IntoField,
    {
        fields
            .into_iter()
            .try_fold(self, |builder, (name, field)| builder.field(name, field))
    }

    /// Replaces all fields
    pub fn set_fields<I, K, F>(self, fields: I) -> BuildResult<Self>
    where
        I: IntoIterator<Item = (K, F)>,
        K: Into<String>,
        F: IntoField,
    {
        Self::new().fields(fields)
    }

    /// Finishes the schema
    pub fn build(self) -> Schema {
        tracing::debug!(
            event = Event::SchemaBuilt.as_str(),
            fields = self.schema.len(),
            "schema built"
        );
        self.schema
    }

    /// Validates data against the fields collected so far, using the
    /// default validator configuration.
    pub fn validate(&self, data: &Value) -> SchemaResult<()> {
        self.validate_with(&SchemaValidator::default(), data)
    }

    /// Validates data against the fields collected so far.
    pub fn validate_with(&self, validator: &SchemaValidator, data: &Value) -> SchemaResult<()> {
        validator.validate_schema(&self.schema, data)
    }
}
