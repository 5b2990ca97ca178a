//! Field and schema descriptor types
//!
//! Supported field shapes:
//! - string: UTF-8 string, optional length bounds
//! - number: any JSON number, optional value bounds
//! - object: nested named fields
//! - array: tuple (positional) or union (any entry matches)
//! - multiple: value must match one of several alternatives

use indexmap::IndexMap;

use super::resolve::TypeName;

/// Length bounds declared on a string field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringBounds {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

/// Value bounds declared on a number field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberBounds {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

/// Scalar kinds together with the bounds that apply to them.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarKind {
    String(StringBounds),
    Number(NumberBounds),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    pub kind: ScalarKind,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField {
    pub fields: FieldMap,
    pub required: bool,
}

/// Array field.
///
/// With `tuple` set, entry *i* validates element *i*. Otherwise every element
/// must satisfy at least one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayField {
    pub entries: Vec<FieldDef>,
    pub tuple: bool,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiTypeField {
    pub alternatives: Vec<FieldDef>,
    pub required: bool,
}

/// A single declared constraint node in a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDef {
    Scalar(ScalarField),
    Object(ObjectField),
    Array(ArrayField),
    MultiType(MultiTypeField),
}

impl FieldDef {
    /// Whether a value must be present for this field
    pub fn is_required(&self) -> bool {
        match self {
            FieldDef::Scalar(f) => f.required,
            FieldDef::Object(f) => f.required,
            FieldDef::Array(f) => f.required,
            FieldDef::MultiType(f) => f.required,
        }
    }

    /// Returns a copy of this field with the required flag replaced
    pub fn with_required(mut self, required: bool) -> Self {
        match &mut self {
            FieldDef::Scalar(f) => f.required = required,
            FieldDef::Object(f) => f.required = required,
            FieldDef::Array(f) => f.required = required,
            FieldDef::MultiType(f) => f.required = required,
        }
        self
    }

    /// Returns the semantic type name of this descriptor
    pub fn type_name(&self) -> TypeName {
        super::resolve::field_type(self)
    }

    fn string(required: bool) -> Self {
        FieldDef::Scalar(ScalarField {
            kind: ScalarKind::String(StringBounds::default()),
            required,
        })
    }

    fn number(required: bool) -> Self {
        FieldDef::Scalar(ScalarField {
            kind: ScalarKind::Number(NumberBounds::default()),
            required,
        })
    }

    /// Create a required string field
    pub fn required_string() -> Self {
        Self::string(true)
    }

    /// Create an optional string field
    pub fn optional_string() -> Self {
        Self::string(false)
    }

    /// Create a required number field
    pub fn required_number() -> Self {
        Self::number(true)
    }

    /// Create an optional number field
    pub fn optional_number() -> Self {
        Self::number(false)
    }

    /// Create a required object field
    pub fn required_object(fields: FieldMap) -> Self {
        FieldDef::Object(ObjectField {
            fields,
            required: true,
        })
    }

    /// Create an optional object field
    pub fn optional_object(fields: FieldMap) -> Self {
        FieldDef::Object(ObjectField {
            fields,
            required: false,
        })
    }

    /// Create an optional positional array field
    pub fn tuple(entries: Vec<FieldDef>) -> Self {
        FieldDef::Array(ArrayField {
            entries,
            tuple: true,
            required: false,
        })
    }

    /// Create an optional array field whose elements match any of `entries`
    pub fn union(entries: Vec<FieldDef>) -> Self {
        FieldDef::Array(ArrayField {
            entries,
            tuple: false,
            required: false,
        })
    }

    /// Create an optional field accepting any of `alternatives`
    pub fn multiple(alternatives: Vec<FieldDef>) -> Self {
        FieldDef::MultiType(MultiTypeField {
            alternatives,
            required: false,
        })
    }
}

/// Insertion-ordered mapping from field name to descriptor.
///
/// Keys are unique. Inserting an existing key replaces its descriptor and
/// keeps its first position, so iteration order (and therefore which
/// failure is reported first) stays stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: IndexMap<String, FieldDef>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, returning the previous descriptor for that name.
    pub fn insert(&mut self, name: impl Into<String>, field: FieldDef) -> Option<FieldDef> {
        self.entries.insert(name.into(), field)
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.entries.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDef)> {
        self.entries.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldDef)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, FieldDef)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(name, field)| (name.into(), field)).collect(),
        }
    }
}

/// Root descriptor for one validation target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: FieldMap,
}

impl Schema {
    /// Create a schema from its field map
    pub fn new(fields: FieldMap) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> &mut FieldMap {
        &mut self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDef)> {
        self.fields.iter()
    }
}

impl From<FieldMap> for Schema {
    fn from(fields: FieldMap) -> Self {
        Self::new(fields)
    }
}
