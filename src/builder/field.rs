//! Field builders
//!
//! Builders are consumed by every call and hand back a new value, so a
//! half-configured builder can be cloned and specialized independently.
//! Type transitions (`FieldBuilder::string()` and friends) carry the
//! required flag over to the typed builder.

use super::errors::{BuildError, BuildResult};
use crate::schema::{
    ArrayField, FieldDef, FieldMap, MultiTypeField, NumberBounds, ObjectField, ScalarField, ScalarKind,
    StringBounds,
};

/// Anything that can be turned into a field descriptor: a finished
/// `FieldDef` or any of the field builders.
pub trait IntoField {
    fn into_field(self) -> BuildResult<FieldDef>;
}

impl IntoField for FieldDef {
    fn into_field(self) -> BuildResult<FieldDef> {
        Ok(self)
    }
}

/// Starts a string field
pub fn string() -> StringFieldBuilder {
    FieldBuilder::new().string()
}

/// Starts a number field
pub fn number() -> NumberFieldBuilder {
    FieldBuilder::new().number()
}

/// Starts an object field
pub fn object() -> ObjectFieldBuilder {
    FieldBuilder::new().object()
}

/// Starts an array field
pub fn array() -> ArrayFieldBuilder {
    FieldBuilder::new().array()
}

/// Starts a multi-type field
pub fn multiple() -> MultiTypeFieldBuilder {
    FieldBuilder::new().multiple()
}

/// Untyped field builder. Building it before choosing a type fails with
/// `BuildError::MissingType`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldBuilder {
    required: bool,
}

impl FieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(self, required: bool) -> Self {
        Self { required }
    }

    pub fn string(self) -> StringFieldBuilder {
        StringFieldBuilder {
            bounds: StringBounds::default(),
            required: self.required,
        }
    }

    pub fn number(self) -> NumberFieldBuilder {
        NumberFieldBuilder {
            bounds: NumberBounds::default(),
            required: self.required,
        }
    }

    pub fn object(self) -> ObjectFieldBuilder {
        ObjectFieldBuilder {
            fields: FieldMap::new(),
            required: self.required,
        }
    }

    pub fn array(self) -> ArrayFieldBuilder {
        ArrayFieldBuilder {
            entries: Vec::new(),
            tuple: false,
            required: self.required,
        }
    }

    pub fn multiple(self) -> MultiTypeFieldBuilder {
        MultiTypeFieldBuilder {
            alternatives: Vec::new(),
            required: self.required,
        }
    }
}

impl IntoField for FieldBuilder {
    fn into_field(self) -> BuildResult<FieldDef> {
        Err(BuildError::MissingType)
    }
}

/// String field with optional length bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringFieldBuilder {
    bounds: StringBounds,
    required: bool,
}

impl StringFieldBuilder {
    pub fn required(self, required: bool) -> Self {
        Self { required, ..self }
    }

    pub fn min_length(self, length: usize) -> BuildResult<Self> {
        if let Some(max) = self.bounds.max_length.filter(|max| length > *max) {
            return Err(BuildError::MinLengthAboveMax { min: length, max });
        }

        let mut next = self;
        next.bounds.min_length = Some(length);
        Ok(next)
    }

    pub fn max_length(self, length: usize) -> BuildResult<Self> {
        if let Some(min) = self.bounds.min_length.filter(|min| length < *min) {
            return Err(BuildError::MaxLengthBelowMin { min, max: length });
        }

        let mut next = self;
        next.bounds.max_length = Some(length);
        Ok(next)
    }

    pub fn build(self) -> FieldDef {
        FieldDef::Scalar(ScalarField {
            kind: ScalarKind::String(self.bounds),
            required: self.required,
        })
    }
}

impl IntoField for StringFieldBuilder {
    fn into_field(self) -> BuildResult<FieldDef> {
        Ok(self.build())
    }
}

/// Number field with optional value bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberFieldBuilder {
    bounds: NumberBounds,
    required: bool,
}

impl NumberFieldBuilder {
    pub fn required(self, required: bool) -> Self {
        Self { required, ..self }
    }

    pub fn min_value(self, value: f64) -> BuildResult<Self> {
        ensure_finite("minValue", value)?;
        if let Some(max) = self.bounds.max_value.filter(|max| value > *max) {
            return Err(BuildError::MinValueAboveMax { min: value, max });
        }

        let mut next = self;
        next.bounds.min_value = Some(value);
        Ok(next)
    }

    pub fn max_value(self, value: f64) -> BuildResult<Self> {
        ensure_finite("maxValue", value)?;
        if let Some(min) = self.bounds.min_value.filter(|min| value < *min) {
            return Err(BuildError::MaxValueBelowMin { min, max: value });
        }

        let mut next = self;
        next.bounds.max_value = Some(value);
        Ok(next)
    }

    pub fn build(self) -> FieldDef {
        FieldDef::Scalar(ScalarField {
            kind: ScalarKind::Number(self.bounds),
            required: self.required,
        })
    }
}

impl IntoField for NumberFieldBuilder {
    fn into_field(self) -> BuildResult<FieldDef> {
        Ok(self.build())
    }
}

fn ensure_finite(bound: &'static str, value: f64) -> BuildResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BuildError::NonFiniteBound { bound, value })
    }
}

/// Object field with named sub-fields
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectFieldBuilder {
    fields: FieldMap,
    required: bool,
}

impl ObjectFieldBuilder {
    pub fn required(self, required: bool) -> Self {
        Self { required, ..self }
    }

    /// Adds (or replaces) one sub-field
    pub fn field(mut self, name: impl Into<String>, field: impl IntoField) -> BuildResult<Self> {
        self.fields.insert(name, field.into_field()?);
        Ok(self)
    }

    /// Adds (or replaces) several sub-fields, in iteration order
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

    /// Replaces all sub-fields
    pub fn set_fields<I, K, F>(self, fields: I) -> BuildResult<Self>
    where
        I: IntoIterator<Item = (K, F)>,
        K: Into<String>,
        F: IntoField,
    {
        Self {
            fields: FieldMap::new(),
            ..self
        }
        .fields(fields)
    }

    pub fn build(self) -> FieldDef {
        FieldDef::Object(ObjectField {
            fields: self.fields,
            required: self.required,
        })
    }
}

impl IntoField for ObjectFieldBuilder {
    fn into_field(self) -> BuildResult<FieldDef> {
        Ok(self.build())
    }
}

/// Array field, union by default, positional once `tuple(true)` is set
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayFieldBuilder {
    entries: Vec<FieldDef>,
    tuple: bool,
    required: bool,
}

impl ArrayFieldBuilder {
    pub fn required(self, required: bool) -> Self {
        Self { required, ..self }
    }

    pub fn tuple(self, tuple: bool) -> Self {
        Self { tuple, ..self }
    }

    /// Appends one entry descriptor
    pub fn entry(mut self, entry: impl IntoField) -> BuildResult<Self> {
        self.entries.push(entry.into_field()?);
        Ok(self)
    }

    /// Appends several entry descriptors, in order
    pub fn entries<I, F>(self, entries: I) -> BuildResult<Self>
    where
        I: IntoIterator<Item = F>,
        F: IntoField,
    {
        entries.into_iter().try_fold(self, |builder, entry| builder.entry(entry))
    }

    /// Replaces all entry descriptors
    pub fn set_entries<I, F>(self, entries: I) -> BuildResult<Self>
    where
        I: IntoIterator<Item = F>,
        F: IntoField,
    {
        Self {
            entries: Vec::new(),
            ..self
        }
        .entries(entries)
    }

    pub fn build(self) -> FieldDef {
        FieldDef::Array(ArrayField {
            entries: self.entries,
            tuple: self.tuple,
            required: self.required,
        })
    }
}

impl IntoField for ArrayFieldBuilder {
    fn into_field(self) -> BuildResult<FieldDef> {
        Ok(self.build())
    }
}

/// Field accepting any one of several alternatives
#[derive(Debug, Clone, PartialEq)]
pub struct MultiTypeFieldBuilder {
    alternatives: Vec<FieldDef>,
    required: bool,
}

impl MultiTypeFieldBuilder {
    pub fn required(self, required: bool) -> Self {
        Self { required, ..self }
    }

    pub fn alternative(mut self, alternative: impl IntoField) -> BuildResult<Self> {
        self.alternatives.push(alternative.into_field()?);
        Ok(self)
    }

    pub fn alternatives<I, F>(self, alternatives: I) -> BuildResult<Self>
    where
        I: IntoIterator<Item = F>,
        F: IntoField,
    {
        alternatives
            .into_iter()
            .try_fold(self, |builder, alternative| builder.alternative(alternative))
    }

    pub fn build(self) -> BuildResult<FieldDef> {
        if self.alternatives.is_empty() {
            return Err(BuildError::NoAlternatives);
        }

        Ok(FieldDef::MultiType(MultiTypeField {
            alternatives: self.alternatives,
            required: self.required,
        }))
    }
}

impl IntoField for MultiTypeFieldBuilder {
    fn into_field(self) -> BuildResult<FieldDef> {
        self.build()
    }
}
