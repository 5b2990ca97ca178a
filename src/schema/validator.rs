//! Schema validator for loosely-typed JSON data
//!
//! Validation semantics:
//! - A non-required field whose value counts as absent is accepted as is
//! - Otherwise the value's type must equal the declared type
//! - Objects recurse into every declared field (`path.name`)
//! - Tuple arrays recurse positionally (`path[i]`), each slot must itself be an array
//! - Union arrays accept an element matching any entry
//! - Multi-type fields accept a value matching any alternative
//!
//! The first hard failure aborts the whole call. Only union and multi-type
//! matching swallow `ValidationError`s, and only while candidates remain.
//! Descriptors are never mutated, so one schema may be validated against any
//! number of documents, from any number of threads.

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult, ValidationError};
use super::resolve::{self, TypeName};
use super::types::{ArrayField, FieldDef, MultiTypeField, ObjectField, ScalarField, ScalarKind, Schema};
use crate::config::{AbsencePolicy, MultiTypeMode, UnionErrorReport, ValidatorConfig};
use crate::observability::Event;

/// Validates a document against a schema with the default configuration.
pub fn validate_schema(schema: &Schema, data: &Value) -> SchemaResult<()> {
    SchemaValidator::default().validate_schema(schema, data)
}

/// Validates a single value against a field with the default configuration.
pub fn validate_field(field: &FieldDef, path: &str, value: Option<&Value>) -> SchemaResult<()> {
    SchemaValidator::default().validate_field(field, path, value)
}

/// Schema validator that checks data documents against descriptors.
///
/// Holds only its configuration; validation itself keeps no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator {
    config: ValidatorConfig,
}

impl SchemaValidator {
    /// Creates a validator with the given configuration.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates a document against a schema.
    ///
    /// Fields are checked in schema order and the first failing field is
    /// reported. Looking up a field on a non-object document yields an
    /// absent value.
    ///
    /// # Errors
    ///
    /// - `SchemaError::Validation` if the data does not match the schema
    /// - `SchemaError::MalformedTuple` if tuple data is not shaped as nested arrays
    pub fn validate_schema(&self, schema: &Schema, data: &Value) -> SchemaResult<()> {
        tracing::debug!(
            event = Event::ValidationStart.as_str(),
            fields = schema.len(),
            "validating document"
        );

        let result = schema
            .iter()
            .try_for_each(|(name, field)| self.validate_field(field, name, data.get(name)));

        match &result {
            Ok(()) => tracing::debug!(
                event = Event::ValidationComplete.as_str(),
                "document accepted"
            ),
            Err(e) => tracing::debug!(
                event = Event::ValidationFailed.as_str(),
                code = e.code().code(),
                path = e.path(),
                "document rejected"
            ),
        }

        result
    }

    /// Validates a value against a field; `None` is an absent value.
    ///
    /// `path` names the value in error messages and is extended with
    /// `.name` and `[index]` segments while recursing.
    pub fn validate_field(&self, field: &FieldDef, path: &str, value: Option<&Value>) -> SchemaResult<()> {
        if !field.is_required() && self.is_absent(value) {
            return Ok(());
        }

        match field {
            FieldDef::MultiType(multi) => self.validate_multi_type(multi, path, value),
            FieldDef::Scalar(scalar) => {
                ensure_type(field, path, value)?;
                self.check_bounds(scalar, path, value)
            }
            FieldDef::Object(object) => {
                ensure_type(field, path, value)?;
                self.validate_object(object, path, value)
            }
            FieldDef::Array(array) => {
                ensure_type(field, path, value)?;
                let items = value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
                if array.tuple {
                    self.validate_tuple(array, path, items)
                } else {
                    self.validate_union(array, path, items)
                }
            }
        }
    }

    fn is_absent(&self, value: Option<&Value>) -> bool {
        match self.config.absence {
            AbsencePolicy::Falsy => resolve::is_falsy(value),
            AbsencePolicy::Missing => matches!(value, None | Some(Value::Null)),
        }
    }

    fn validate_object(&self, object: &ObjectField, path: &str, value: Option<&Value>) -> SchemaResult<()> {
        for (name, field) in object.fields.iter() {
            let child = value.and_then(|v| v.get(name));
            self.validate_field(field, &format!("{}.{}", path, name), child)?;
        }
        Ok(())
    }

    /// Entry *i* validates element *i*. Every slot covered by an entry must
    /// hold an array; elements past the last entry are not checked.
    fn validate_tuple(&self, array: &ArrayField, path: &str, items: &[Value]) -> SchemaResult<()> {
        for (index, entry) in array.entries.iter().enumerate() {
            let slot = items.get(index);
            if !matches!(slot, Some(Value::Array(_))) {
                return Err(SchemaError::malformed_tuple(path));
            }

            self.validate_field(entry, &format!("{}[{}]", path, index), slot)?;
        }
        Ok(())
    }

    /// Every element must satisfy at least one entry.
    fn validate_union(&self, array: &ArrayField, path: &str, items: &[Value]) -> SchemaResult<()> {
        let mut tentative: Option<ValidationError> = None;

        for (index, element) in items.iter().enumerate() {
            let element_path = format!("{}[{}]", path, index);

            match self.first_match(&array.entries, &element_path, Some(element))? {
                None => tentative = None,
                Some(err) => match self.config.union_errors {
                    UnionErrorReport::FirstFailing => return Err(err.into()),
                    UnionErrorReport::LastUnresolved => {
                        tentative.get_or_insert(err);
                    }
                },
            }
        }

        match tentative {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn validate_multi_type(&self, multi: &MultiTypeField, path: &str, value: Option<&Value>) -> SchemaResult<()> {
        if self.config.multi_type == MultiTypeMode::Unchecked {
            return Ok(());
        }

        // A required field rejects missing and null values even when its
        // alternatives are optional.
        let missing = matches!(value, None | Some(Value::Null));
        if multi.alternatives.is_empty() || (multi.required && missing) {
            let received = resolve::value_type(value);
            return Err(ValidationError::type_mismatch(path, TypeName::Multiple, received, value).into());
        }

        match self.first_match(&multi.alternatives, path, value)? {
            None => Ok(()),
            Some(err) => Err(err.into()),
        }
    }

    /// Tries candidates in declared order.
    ///
    /// Returns `Ok(None)` as soon as one accepts the value (or when there are
    /// no candidates), otherwise the first candidate's `ValidationError`.
    /// Structural errors propagate immediately.
    fn first_match(
        &self,
        candidates: &[FieldDef],
        path: &str,
        value: Option<&Value>,
    ) -> SchemaResult<Option<ValidationError>> {
        let mut first_error = None;

        for candidate in candidates {
            match self.validate_field(candidate, path, value) {
                Ok(()) => return Ok(None),
                Err(SchemaError::Validation(err)) => {
                    tracing::trace!(
                        event = Event::CandidateRejected.as_str(),
                        path = %err.path,
                        expected = %err.expected,
                        received = %err.received,
                        "candidate rejected value"
                    );
                    first_error.get_or_insert(err);
                }
                Err(other) => return Err(other),
            }
        }

        Ok(first_error)
    }

    /// Declared bounds are only checked when `enforce_bounds` is set.
    fn check_bounds(&self, scalar: &ScalarField, path: &str, value: Option<&Value>) -> SchemaResult<()> {
        if !self.config.enforce_bounds {
            return Ok(());
        }

        match (&scalar.kind, value) {
            (ScalarKind::String(bounds), Some(Value::String(s))) => {
                let length = s.chars().count();
                if let Some(min) = bounds.min_length.filter(|min| length < *min) {
                    return Err(bound_error(path, format!("minLength {}", min), format!("length {}", length), value));
                }
                if let Some(max) = bounds.max_length.filter(|max| length > *max) {
                    return Err(bound_error(path, format!("maxLength {}", max), format!("length {}", length), value));
                }
                Ok(())
            }
            (ScalarKind::Number(bounds), Some(Value::Number(n))) => {
                let Some(number) = n.as_f64() else {
                    return Ok(());
                };
                if let Some(min) = bounds.min_value.filter(|min| number < *min) {
                    return Err(bound_error(path, format!("minValue {}", min), format!("value {}", n), value));
                }
                if let Some(max) = bounds.max_value.filter(|max| number > *max) {
                    return Err(bound_error(path, format!("maxValue {}", max), format!("value {}", n), value));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Fails unless the value's resolved type equals the field's declared type.
fn ensure_type(field: &FieldDef, path: &str, value: Option<&Value>) -> SchemaResult<()> {
    let expected = resolve::field_type(field);
    let received = resolve::value_type(value);

    if expected != received {
        return Err(ValidationError::type_mismatch(path, expected, received, value).into());
    }
    Ok(())
}

fn bound_error(path: &str, expected: String, received: String, value: Option<&Value>) -> SchemaError {
    ValidationError::out_of_bounds(path, expected, received, value).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{FieldMap, NumberBounds, StringBounds};
    use serde_json::json;

    fn schema_of(fields: Vec<(&str, FieldDef)>) -> Schema {
        Schema::new(fields.into_iter().collect())
    }

    fn bounded_string(min_length: Option<usize>, max_length: Option<usize>) -> FieldDef {
        FieldDef::Scalar(ScalarField {
            kind: ScalarKind::String(StringBounds { min_length, max_length }),
            required: true,
        })
    }

    fn bounded_number(min_value: Option<f64>, max_value: Option<f64>) -> FieldDef {
        FieldDef::Scalar(ScalarField {
            kind: ScalarKind::Number(NumberBounds { min_value, max_value }),
            required: true,
        })
    }

    fn strict() -> SchemaValidator {
        SchemaValidator::new(ValidatorConfig::default().with_enforce_bounds(true))
    }

    #[test]
    fn test_valid_document_passes() {
        let schema = schema_of(vec![
            ("name", FieldDef::required_string()),
            ("age", FieldDef::optional_number()),
        ]);

        assert!(validate_schema(&schema, &json!({ "name": "Alice", "age": 30 })).is_ok());
        assert!(validate_schema(&schema, &json!({ "name": "Alice" })).is_ok());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let schema = schema_of(vec![("name", FieldDef::required_string())]);

        let err = validate_schema(&schema, &json!({})).unwrap_err();
        let details = err.as_validation().unwrap();
        assert_eq!(details.path, "name");
        assert_eq!(details.expected, "string");
        assert_eq!(details.received, "undefined");
    }

    #[test]
    fn test_type_mismatch_fails() {
        let schema = schema_of(vec![("name", FieldDef::required_string())]);

        let err = validate_schema(&schema, &json!({ "name": 123 })).unwrap_err();
        assert_eq!(
            err.as_validation().unwrap().message,
            "Required string, received number.\n>>  name: 123"
        );
    }

    #[test]
    fn test_optional_field_skips_falsy_values() {
        let field = FieldDef::optional_string();

        for value in [json!(null), json!(false), json!(0), json!("")] {
            assert!(validate_field(&field, "f", Some(&value)).is_ok(), "{}", value);
        }
        assert!(validate_field(&field, "f", None).is_ok());
        assert!(validate_field(&field, "f", Some(&json!(1))).is_err());
    }

    #[test]
    fn test_required_number_zero_is_checked() {
        let field = FieldDef::required_number();
        assert!(validate_field(&field, "count", Some(&json!(0))).is_ok());
        assert!(validate_field(&field, "count", Some(&json!("0"))).is_err());
    }

    #[test]
    fn test_missing_policy_checks_present_falsy_values() {
        let validator = SchemaValidator::new(ValidatorConfig::default().with_absence(AbsencePolicy::Missing));
        let field = FieldDef::optional_string();

        assert!(validator.validate_field(&field, "f", None).is_ok());
        assert!(validator.validate_field(&field, "f", Some(&Value::Null)).is_ok());
        assert!(validator.validate_field(&field, "f", Some(&json!(""))).is_ok());

        let err = validator.validate_field(&field, "f", Some(&json!(0))).unwrap_err();
        assert_eq!(err.as_validation().unwrap().received, "number");
    }

    #[test]
    fn test_null_is_its_own_type() {
        let field = FieldDef::required_object(FieldMap::new());
        let err = validate_field(&field, "meta", Some(&Value::Null)).unwrap_err();
        assert_eq!(err.as_validation().unwrap().received, "null");
    }

    #[test]
    fn test_nested_object_paths() {
        let address: FieldMap = [
            ("city", FieldDef::required_string()),
            ("zip", FieldDef::required_string()),
        ]
        .into_iter()
        .collect();
        let schema = schema_of(vec![("address", FieldDef::required_object(address))]);

        assert!(validate_schema(&schema, &json!({ "address": { "city": "NYC", "zip": "10001" } })).is_ok());

        let err = validate_schema(&schema, &json!({ "address": { "city": "NYC" } })).unwrap_err();
        assert_eq!(err.path(), "address.zip");
        assert!(err.to_string().contains(">>  zip: undefined"));
    }

    #[test]
    fn test_object_reports_first_declared_failure() {
        let fields: FieldMap = [
            ("b", FieldDef::required_string()),
            ("a", FieldDef::required_string()),
        ]
        .into_iter()
        .collect();
        let field = FieldDef::required_object(fields);

        let err = validate_field(&field, "root", Some(&json!({}))).unwrap_err();
        assert_eq!(err.path(), "root.b");
    }

    #[test]
    fn test_tuple_requires_array_slots() {
        let field = FieldDef::tuple(vec![FieldDef::required_number(), FieldDef::required_string()]);

        let err = validate_field(&field, "pair", Some(&json!([1, "2"]))).unwrap_err();
        assert_eq!(err, SchemaError::malformed_tuple("pair"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_tuple_missing_slot_fails() {
        let field = FieldDef::tuple(vec![
            FieldDef::union(vec![FieldDef::required_number()]),
            FieldDef::union(vec![FieldDef::required_string()]),
        ]);

        let err = validate_field(&field, "pair", Some(&json!([[1]]))).unwrap_err();
        assert_eq!(err.to_string(), "Field 'pair' must be an array.");
    }

    #[test]
    fn test_tuple_of_nested_arrays() {
        let field = FieldDef::tuple(vec![
            FieldDef::union(vec![FieldDef::required_number()]),
            FieldDef::union(vec![FieldDef::required_string()]),
        ]);

        assert!(validate_field(&field, "pair", Some(&json!([[1, 2], ["a"], "ignored"]))).is_ok());

        let err = validate_field(&field, "pair", Some(&json!([[1], [2]]))).unwrap_err();
        assert_eq!(err.path(), "pair[1][0]");
    }

    #[test]
    fn test_union_accepts_any_candidate() {
        let field = FieldDef::union(vec![FieldDef::required_number(), FieldDef::required_string()]);
        assert!(validate_field(&field, "items", Some(&json!([1, "two", 3]))).is_ok());
    }

    #[test]
    fn test_union_reports_first_candidate_error() {
        let field = FieldDef::union(vec![FieldDef::required_number(), FieldDef::required_string()]);

        let err = validate_field(&field, "items", Some(&json!([true]))).unwrap_err();
        let details = err.as_validation().unwrap();
        assert_eq!(details.path, "items[0]");
        assert_eq!(details.expected, "number");
        assert_eq!(details.received, "boolean");
    }

    #[test]
    fn test_union_later_success_clears_earlier_failure() {
        let field = FieldDef::union(vec![FieldDef::required_number()]);

        // A rejected element followed by an accepted one is forgiven.
        assert!(validate_field(&field, "items", Some(&json!(["a", 1]))).is_ok());

        let err = validate_field(&field, "items", Some(&json!(["a", 1, "b"]))).unwrap_err();
        assert_eq!(err.path(), "items[2]");

        // Consecutive rejections keep the earliest one.
        let err = validate_field(&field, "items", Some(&json!([1, "a", "b"]))).unwrap_err();
        assert_eq!(err.path(), "items[1]");
    }

    #[test]
    fn test_union_first_failing_report() {
        let validator =
            SchemaValidator::new(ValidatorConfig::default().with_union_errors(UnionErrorReport::FirstFailing));
        let field = FieldDef::union(vec![FieldDef::required_number()]);

        let err = validator.validate_field(&field, "items", Some(&json!(["a", 1]))).unwrap_err();
        assert_eq!(err.path(), "items[0]");
    }

    #[test]
    fn test_union_without_entries_accepts_everything() {
        let field = FieldDef::union(vec![]);
        assert!(validate_field(&field, "items", Some(&json!([1, "a", {}]))).is_ok());
    }

    #[test]
    fn test_union_propagates_structural_errors() {
        let field = FieldDef::union(vec![
            FieldDef::tuple(vec![FieldDef::union(vec![])]),
            FieldDef::union(vec![]),
        ]);

        let err = validate_field(&field, "rows", Some(&json!([[1]]))).unwrap_err();
        assert_eq!(err, SchemaError::malformed_tuple("rows[0]"));
    }

    #[test]
    fn test_multi_type_first_match() {
        let field = FieldDef::multiple(vec![FieldDef::required_string(), FieldDef::required_number()])
            .with_required(true);

        assert!(validate_field(&field, "id", Some(&json!("abc"))).is_ok());
        assert!(validate_field(&field, "id", Some(&json!(7))).is_ok());

        let err = validate_field(&field, "id", Some(&json!([]))).unwrap_err();
        let details = err.as_validation().unwrap();
        assert_eq!(details.expected, "string");
        assert_eq!(details.received, "array");
    }

    #[test]
    fn test_required_multi_type_rejects_absent_value() {
        let field = FieldDef::multiple(vec![FieldDef::optional_string(), FieldDef::optional_number()])
            .with_required(true);

        let err = validate_field(&field, "id", None).unwrap_err();
        let details = err.as_validation().unwrap();
        assert_eq!(details.expected, "multiple");
        assert_eq!(details.received, "undefined");

        assert!(validate_field(&field, "id", Some(&json!(null))).is_err());
        assert!(validate_field(&field, "id", Some(&json!("abc"))).is_ok());
        assert!(validate_field(&field, "id", Some(&json!(0))).is_ok());
        assert!(validate_field(&field.clone().with_required(false), "id", None).is_ok());
    }

    #[test]
    fn test_multi_type_without_alternatives() {
        let field = FieldDef::multiple(vec![]).with_required(true);
        let err = validate_field(&field, "id", Some(&json!(1))).unwrap_err();
        assert_eq!(err.as_validation().unwrap().expected, "multiple");
    }

    #[test]
    fn test_multi_type_unchecked_mode() {
        let validator =
            SchemaValidator::new(ValidatorConfig::default().with_multi_type(MultiTypeMode::Unchecked));
        let field = FieldDef::multiple(vec![FieldDef::required_string()]).with_required(true);

        assert!(validator.validate_field(&field, "id", Some(&json!({}))).is_ok());
    }

    #[test]
    fn test_bounds_ignored_by_default() {
        let field = bounded_string(Some(3), Some(5));
        assert!(validate_field(&field, "code", Some(&json!("a"))).is_ok());
        assert!(validate_field(&bounded_number(Some(1.0), None), "n", Some(&json!(-4))).is_ok());
    }

    #[test]
    fn test_string_bounds_enforced_when_enabled() {
        let field = bounded_string(Some(3), Some(5));
        let validator = strict();

        assert!(validator.validate_field(&field, "code", Some(&json!("abcd"))).is_ok());
        // Length counts characters, not bytes.
        assert!(validator.validate_field(&field, "code", Some(&json!("ååå"))).is_ok());

        let err = validator.validate_field(&field, "code", Some(&json!("ab"))).unwrap_err();
        let details = err.as_validation().unwrap();
        assert_eq!(details.expected, "minLength 3");
        assert_eq!(details.received, "length 2");

        let err = validator.validate_field(&field, "code", Some(&json!("abcdef"))).unwrap_err();
        assert_eq!(err.as_validation().unwrap().expected, "maxLength 5");
    }

    #[test]
    fn test_number_bounds_enforced_when_enabled() {
        let field = bounded_number(Some(0.5), Some(10.0));
        let validator = strict();

        assert!(validator.validate_field(&field, "ratio", Some(&json!(10))).is_ok());

        let err = validator.validate_field(&field, "ratio", Some(&json!(0.25))).unwrap_err();
        assert_eq!(err.as_validation().unwrap().expected, "minValue 0.5");

        let err = validator.validate_field(&field, "ratio", Some(&json!(11))).unwrap_err();
        let details = err.as_validation().unwrap();
        assert_eq!(details.expected, "maxValue 10");
        assert_eq!(details.received, "value 11");
    }

    #[test]
    fn test_non_object_document_has_absent_fields() {
        let schema = schema_of(vec![("name", FieldDef::required_string())]);

        let err = validate_schema(&schema, &json!([1, 2])).unwrap_err();
        assert_eq!(err.as_validation().unwrap().received, "undefined");
        assert!(validate_schema(&schema_of(vec![("name", FieldDef::optional_string())]), &json!(5)).is_ok());
    }
}
