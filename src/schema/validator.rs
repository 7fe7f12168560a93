//! Schema validator for decoded JSON data
//!
//! Validation semantics:
//! - Data and schema are walked in lock-step
//! - The first failure stops the run (collect mode aside)
//! - Object attributes are visited in declaration order, array elements in
//!   index order
//! - Absent attributes are skipped unless `enforce_required` is set
//! - A present `null` is a value, not an absent attribute
//! - Validation never mutates the data and keeps no state between runs

use std::cmp::Ordering;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;

use super::config::ValidatorConfig;
use super::decode::decode;
use super::errors::{ValidationError, ValidationResult};
use super::number::PlainNumber;
use super::types::{ArraySchema, NumberSchema, ObjectSchema, Schema, SchemaKind, StringSchema};
use crate::observability::{Event, LogSink, Severity, ValidationMetrics};

/// Longest rendering of an offending value inside a message
const PREVIEW_LIMIT: usize = 64;

/// Validates `data` against `schema` with the default configuration.
///
/// Returns `Ok(true)` when the data conforms, or the first failure.
pub fn verify(data: &Value, schema: &Schema) -> ValidationResult<bool> {
    Validator::default().verify(data, schema)
}

/// Decodes `text` as an object and validates it with the default configuration.
pub fn verify_str(text: &str, schema: &Schema) -> ValidationResult<bool> {
    Validator::default().verify_str(text, schema)
}

/// Reusable validation engine.
///
/// Holds only read-only configuration, optional shared counters and a log
/// sink, so one validator can serve any number of runs, including from
/// several threads.
#[derive(Debug, Default, Clone)]
pub struct Validator {
    config: ValidatorConfig,
    metrics: Option<Arc<ValidationMetrics>>,
    sink: LogSink,
}

impl Validator {
    /// Creates a validator with the given configuration
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config,
            metrics: None,
            sink: LogSink::default(),
        }
    }

    /// Records outcomes into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<ValidationMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Sends event lines to `sink` instead of stdout/stderr
    pub fn with_log_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates `data` against `schema`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` in attribute declaration order and
    /// array index order.
    pub fn verify(&self, data: &Value, schema: &Schema) -> ValidationResult<bool> {
        self.log(Event::ValidationBegin, &[("schema", schema.kind().name())]);

        let mut errors = self.run(data, schema, Mode::FailFast);
        match errors.pop() {
            None => {
                self.record_outcome(None);
                Ok(true)
            }
            Some(err) => {
                self.record_outcome(Some(&err));
                Err(err)
            }
        }
    }

    /// Decodes `text` and validates the resulting object.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` before any schema check when the text is not
    /// a bracketed JSON object.
    pub fn verify_str(&self, text: &str, schema: &Schema) -> ValidationResult<bool> {
        let map = decode(text).map_err(|err| {
            if let Some(metrics) = &self.metrics {
                metrics.increment_malformed_inputs();
            }
            self.log(Event::InputRejected, &[("message", err.message())]);
            err
        })?;

        self.verify(&Value::Object(map), schema)
    }

    /// Validates `data` and returns every failure in walk order.
    ///
    /// A type mismatch still stops descent into that value; siblings and
    /// later elements are checked.
    pub fn collect(&self, data: &Value, schema: &Schema) -> Vec<ValidationError> {
        self.log(Event::ValidationBegin, &[("schema", schema.kind().name())]);

        let errors = self.run(data, schema, Mode::CollectAll);
        self.record_outcome(errors.first());
        errors
    }

    fn run(&self, data: &Value, schema: &Schema, mode: Mode) -> Vec<ValidationError> {
        let mut walk = Walk::new(&self.config, mode);
        // Halt only means "stop walking"; the failure is already recorded
        let _ = walk.check(data, schema, "$", 1);
        walk.errors
    }

    fn record_outcome(&self, failure: Option<&ValidationError>) {
        match failure {
            None => {
                if let Some(metrics) = &self.metrics {
                    metrics.increment_passed();
                }
                self.log(Event::ValidationPassed, &[]);
            }
            Some(err) => {
                if let Some(metrics) = &self.metrics {
                    metrics.increment_failed();
                }
                self.log(
                    Event::ValidationFailed,
                    &[
                        ("code", err.code()),
                        ("message", err.message()),
                        ("path", err.path()),
                    ],
                );
            }
        }
    }

    fn log(&self, event: Event, fields: &[(&str, &str)]) {
        if !self.config.log_events {
            return;
        }
        let severity = match event {
            Event::ValidationBegin => Severity::Trace,
            Event::ValidationPassed => Severity::Info,
            Event::ValidationFailed => Severity::Warn,
            Event::InputRejected => Severity::Error,
        };
        self.sink.log(severity, event.as_str(), fields);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    FailFast,
    CollectAll,
}

/// Stop signal raised by a fail-fast walk
struct Halt;

type Step = Result<(), Halt>;

/// State of one validation run
struct Walk<'a> {
    config: &'a ValidatorConfig,
    mode: Mode,
    errors: Vec<ValidationError>,
}

impl<'a> Walk<'a> {
    fn new(config: &'a ValidatorConfig, mode: Mode) -> Self {
        Self {
            config,
            mode,
            errors: Vec::new(),
        }
    }

    /// Records a failure raised by `schema`, applying its message override
    fn report(&mut self, schema: &Schema, err: ValidationError) -> Step {
        let err = match schema.message_for(err.kind()) {
            Some(message) => err.with_message(message),
            None => err,
        };
        self.errors.push(err);

        match self.mode {
            Mode::FailFast => Err(Halt),
            Mode::CollectAll => Ok(()),
        }
    }

    fn check(&mut self, value: &Value, schema: &Schema, path: &str, depth: usize) -> Step {
        if depth > self.config.max_depth {
            return self.report(
                schema,
                ValidationError::depth_exceeded(path, self.config.max_depth),
            );
        }

        match schema {
            Schema::String(s) => self.check_string(value, s, schema, path),
            Schema::Number(n) => self.check_number(value, n, schema, path),
            Schema::Bool(_) => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    self.report(schema, type_error(path, SchemaKind::Bool, value))
                }
            }
            Schema::Object(obj) => self.check_object(value, obj, schema, path, depth),
            Schema::Array(arr) => self.check_array(value, arr, schema, path, depth),
        }
    }

    fn check_string(
        &mut self,
        value: &Value,
        string_schema: &StringSchema,
        schema: &Schema,
        path: &str,
    ) -> Step {
        let text = match value.as_str() {
            Some(text) => text,
            None => return self.report(schema, type_error(path, SchemaKind::String, value)),
        };

        if let Some(pattern) = string_schema.get_pattern() {
            if !pattern.is_full_match(text) {
                self.report(
                    schema,
                    ValidationError::pattern_mismatch(path, text, pattern.as_str()),
                )?;
            }
        }

        let min = string_schema.get_min_length();
        let max = string_schema.get_max_length();
        if min.is_some() || max.is_some() {
            let length = text.chars().count();
            let too_short = min.is_some_and(|min| length < min);
            let too_long = max.is_some_and(|max| length > max);
            if too_short || too_long {
                self.report(
                    schema,
                    ValidationError::length_out_of_range(path, text, length, min, max),
                )?;
            }
        }

        Ok(())
    }

    fn check_number(
        &mut self,
        value: &Value,
        number_schema: &NumberSchema,
        schema: &Schema,
        path: &str,
    ) -> Step {
        let lexical = match lexical_number(value) {
            Some(lexical) => lexical,
            None => return self.report(schema, type_error(path, SchemaKind::Number, value)),
        };
        let number = match PlainNumber::parse(&lexical) {
            Some(number) => number,
            None => return self.report(schema, type_error(path, SchemaKind::Number, value)),
        };

        if let Some(allowed) = number_schema.get_enumeration() {
            let listed = allowed
                .iter()
                .any(|candidate| number.cmp_decimal(candidate) == Ordering::Equal);
            if !listed {
                self.report(
                    schema,
                    ValidationError::not_in_enumeration(path, &lexical, &render_decimals(allowed)),
                )?;
            }
        }

        if let Some(max) = number_schema.get_maximum() {
            if number.cmp_decimal(&max) == Ordering::Greater {
                self.report(
                    schema,
                    ValidationError::above_maximum(path, &lexical, &max.to_string()),
                )?;
            }
        }

        if let Some(min) = number_schema.get_minimum() {
            if number.cmp_decimal(&min) == Ordering::Less {
                self.report(
                    schema,
                    ValidationError::below_minimum(path, &lexical, &min.to_string()),
                )?;
            }
        }

        Ok(())
    }

    fn check_object(
        &mut self,
        value: &Value,
        object_schema: &ObjectSchema,
        schema: &Schema,
        path: &str,
        depth: usize,
    ) -> Step {
        let map = match value.as_object() {
            Some(map) => map,
            None => return self.report(schema, type_error(path, SchemaKind::Object, value)),
        };

        if self.config.enforce_required {
            for name in object_schema.required() {
                if !map.contains_key(name) {
                    self.report(schema, ValidationError::missing_required(path, name))?;
                }
            }
        }

        for (name, child) in object_schema.attributes() {
            // Absent attributes are not failures here; see enforce_required
            if let Some(field) = map.get(name) {
                self.check(field, child, &make_path(path, name), depth + 1)?;
            }
        }

        Ok(())
    }

    fn check_array(
        &mut self,
        value: &Value,
        array_schema: &ArraySchema,
        schema: &Schema,
        path: &str,
        depth: usize,
    ) -> Step {
        let items = match value.as_array() {
            Some(items) => items,
            None => return self.report(schema, type_error(path, SchemaKind::Array, value)),
        };

        let element = array_schema.element();
        for (index, item) in items.iter().enumerate() {
            let item_path = format!("{}[{}]", path, index);
            let mut inner = Walk::new(self.config, self.mode);

            if admits(element.kind(), item) {
                let _ = inner.check(item, element, &item_path, depth + 1);
            } else {
                let _ = inner.report(element, type_error(&item_path, element.kind(), item));
            }

            for cause in inner.errors {
                self.report(schema, ValidationError::array_element(path, index, cause))?;
            }
        }

        Ok(())
    }
}

/// Kind-consistency pre-check for array elements.
///
/// Numbers may arrive as JSON numbers or as numeric strings; the lexical
/// check happens later.
fn admits(kind: SchemaKind, value: &Value) -> bool {
    match kind {
        SchemaKind::String => value.is_string(),
        SchemaKind::Number => value.is_number() || value.is_string(),
        SchemaKind::Bool => value.is_boolean(),
        SchemaKind::Object => value.is_object(),
        SchemaKind::Array => value.is_array(),
    }
}

/// Text form of a numeric candidate
fn lexical_number(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn render_decimals(values: &[Decimal]) -> String {
    let parts: Vec<String> = values.iter().map(Decimal::to_string).collect();
    format!("[{}]", parts.join(", "))
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Short rendering of a value for messages
fn preview(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.chars().count() <= PREVIEW_LIMIT {
        return text;
    }
    let mut short: String = text.chars().take(PREVIEW_LIMIT - 3).collect();
    short.push_str("...");
    short
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    format!("{}.{}", prefix, field)
}

/// Creates a type mismatch error.
fn type_error(path: &str, expected: SchemaKind, actual: &Value) -> ValidationError {
    ValidationError::type_mismatch(path, expected.name(), json_type_name(actual), &preview(actual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::errors::ErrorKind;
    use crate::schema::types::BoolSchema;
    use serde_json::json;
    use std::sync::Mutex;

    fn user_schema() -> Schema {
        ObjectSchema::new()
            .attr(
                "name",
                StringSchema::new()
                    .pattern("[A-Za-z ]+")
                    .unwrap()
                    .min_length(2)
                    .max_length(20),
            )
            .attr("age", NumberSchema::new().minimum(0).maximum(150))
            .attr("active", BoolSchema::new())
            .attr("tags", ArraySchema::new(StringSchema::new()))
            .require(["name"])
            .into()
    }

    #[test]
    fn test_valid_document_passes() {
        let doc = json!({
            "name": "Alice",
            "age": 30,
            "active": true,
            "tags": ["admin", "ops"]
        });
        assert_eq!(verify(&doc, &user_schema()), Ok(true));
    }

    #[test]
    fn test_string_type_mismatch() {
        let schema: Schema = StringSchema::new().into();
        let err = verify(&json!(42), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.path(), "$");
        assert!(err.message().contains("expected string"));
        assert!(err.message().contains("42"));
    }

    #[test]
    fn test_string_pattern_is_full_match() {
        let schema: Schema = StringSchema::new().pattern("[0-9]{3}").unwrap().into();
        assert!(verify(&json!("123"), &schema).is_ok());

        let err = verify(&json!("1234"), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PatternMismatch);
        assert!(err.message().contains("[1234]"));
    }

    #[test]
    fn test_string_length_bounds_inclusive() {
        let schema: Schema = StringSchema::new().min_length(2).max_length(3).into();
        assert!(verify(&json!("ab"), &schema).is_ok());
        assert!(verify(&json!("abc"), &schema).is_ok());

        let err = verify(&json!("a"), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthOutOfRange);
        let err = verify(&json!("abcd"), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthOutOfRange);
        assert!(err.message().contains("[abcd]"));
    }

    #[test]
    fn test_string_length_counts_characters() {
        let schema: Schema = StringSchema::new().max_length(2).into();
        assert!(verify(&json!("éé"), &schema).is_ok());
    }

    #[test]
    fn test_pattern_checked_before_length() {
        let schema: Schema = StringSchema::new()
            .pattern("[a-z]+")
            .unwrap()
            .max_length(2)
            .into();
        let err = verify(&json!("ABCD"), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PatternMismatch);
    }

    #[test]
    fn test_bool_type() {
        let schema: Schema = BoolSchema::new().into();
        assert!(verify(&json!(false), &schema).is_ok());
        let err = verify(&json!("true"), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_number_lexical_forms() {
        let schema: Schema = NumberSchema::new().into();
        assert!(verify(&json!(7), &schema).is_ok());
        assert!(verify(&json!(7.25), &schema).is_ok());
        assert!(verify(&json!("12"), &schema).is_ok());
        assert!(verify(&json!("12.5"), &schema).is_ok());

        for bad in [json!(-1), json!("1."), json!(".5"), json!("1e3"), json!("abc"), json!(true), json!(null)] {
            let err = verify(&bad, &schema).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TypeMismatch, "value {}", bad);
        }
    }

    #[test]
    fn test_enumeration_uses_decimal_equality() {
        let schema: Schema = NumberSchema::new().enumeration([2]).into();
        assert!(verify(&json!("2.0"), &schema).is_ok());
        assert!(verify(&json!(2.0), &schema).is_ok());

        let err = verify(&json!(3), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotInEnumeration);
        assert!(err.message().contains("[2]"));
    }

    #[test]
    fn test_maximum_inclusive() {
        let schema: Schema = NumberSchema::new().maximum(Decimal::new(105, 1)).into();
        assert!(verify(&json!("10.5"), &schema).is_ok());

        let err = verify(&json!("10.51"), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AboveMaximum);
        assert!(err.message().contains("10.5"));
    }

    #[test]
    fn test_minimum_inclusive() {
        let schema: Schema = NumberSchema::new().minimum(5).into();
        assert!(verify(&json!(5), &schema).is_ok());

        let err = verify(&json!(4.99), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BelowMinimum);
        assert!(err.message().contains('5'));
    }

    #[test]
    fn test_bounds_exact_beyond_decimal_precision() {
        let value = json!("1.00000000000000000000000000000001");

        let err = verify(&value, &NumberSchema::new().maximum(1).into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AboveMaximum);

        let err = verify(&value, &NumberSchema::new().enumeration([1]).into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotInEnumeration);

        let just_below = json!("0.99999999999999999999999999999999");
        let err = verify(&just_below, &NumberSchema::new().minimum(1).into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BelowMinimum);
    }

    #[test]
    fn test_number_wider_than_decimal_reports_bound() {
        let huge = json!("100000000000000000000000000000000");
        let err = verify(&huge, &NumberSchema::new().maximum(100).into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AboveMaximum);
        assert!(err.message().contains("100"));

        assert!(verify(&huge, &NumberSchema::new().minimum(100).into()).is_ok());
        assert!(verify(&huge, &NumberSchema::new().into()).is_ok());
    }

    #[test]
    fn test_enumeration_checked_before_bounds() {
        let schema: Schema = NumberSchema::new().enumeration([1, 2]).maximum(1).into();
        let err = verify(&json!(5), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotInEnumeration);
    }

    #[test]
    fn test_absent_attribute_skipped_by_default() {
        let schema: Schema = ObjectSchema::new()
            .attr("a", StringSchema::new())
            .attr("b", NumberSchema::new())
            .require(["b"])
            .into();
        assert_eq!(verify(&json!({"a": "x"}), &schema), Ok(true));
    }

    #[test]
    fn test_present_null_is_not_absent() {
        let schema: Schema = ObjectSchema::new().attr("a", StringSchema::new()).into();
        let err = verify(&json!({"a": null}), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.path(), "$.a");
    }

    #[test]
    fn test_undeclared_attributes_ignored() {
        let schema: Schema = ObjectSchema::new().attr("a", StringSchema::new()).into();
        assert!(verify(&json!({"a": "x", "extra": 1}), &schema).is_ok());
    }

    #[test]
    fn test_object_first_failure_in_declaration_order() {
        let schema: Schema = ObjectSchema::new()
            .attr("z", StringSchema::new())
            .attr("a", BoolSchema::new())
            .into();
        let err = verify(&json!({"a": 1, "z": 2}), &schema).unwrap_err();
        assert_eq!(err.path(), "$.z");
    }

    #[test]
    fn test_object_type_mismatch() {
        let err = verify(&json!([1]), &user_schema()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(err.message().contains("expected object"));
    }

    #[test]
    fn test_nested_failure_propagates_unchanged() {
        let schema: Schema = ObjectSchema::new()
            .attr(
                "address",
                ObjectSchema::new().attr("zip", StringSchema::new().pattern("[0-9]{5}").unwrap()),
            )
            .into();
        let err = verify(&json!({"address": {"zip": "ABCDE"}}), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PatternMismatch);
        assert_eq!(err.path(), "$.address.zip");
    }

    #[test]
    fn test_array_stops_at_first_bad_element() {
        let schema: Schema = ArraySchema::new(NumberSchema::new()).into();
        let err = verify(&json!([1, 2, "x", true]), &schema).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ArrayElementInvalid);
        assert!(err.message().contains("element 2"));
        let cause = err.root_cause();
        assert_eq!(cause.kind(), ErrorKind::TypeMismatch);
        assert_eq!(cause.path(), "$[2]");
    }

    #[test]
    fn test_array_kind_precheck_for_strings() {
        let schema: Schema = ArraySchema::new(StringSchema::new()).into();
        let err = verify(&json!(["a", 1]), &schema).unwrap_err();
        assert_eq!(err.root_cause().kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.root_cause().path(), "$[1]");
    }

    #[test]
    fn test_array_element_constraint_failure_wrapped() {
        let schema: Schema = ArraySchema::new(NumberSchema::new().maximum(10)).into();
        let err = verify(&json!([1, 11]), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArrayElementInvalid);
        assert_eq!(err.root_cause().kind(), ErrorKind::AboveMaximum);
    }

    #[test]
    fn test_nested_arrays_wrap_twice() {
        let schema: Schema = ArraySchema::new(ArraySchema::new(BoolSchema::new())).into();
        let err = verify(&json!([[true], [true, 0]]), &schema).unwrap_err();
        let inner = err.cause().unwrap();
        assert_eq!(inner.kind(), ErrorKind::ArrayElementInvalid);
        assert_eq!(inner.path(), "$[1]");
        assert_eq!(err.root_cause().path(), "$[1][1]");
    }

    #[test]
    fn test_array_type_mismatch() {
        let schema: Schema = ArraySchema::new(BoolSchema::new()).into();
        let err = verify(&json!({"a": true}), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_message_override_replaces_default() {
        let schema: Schema = ObjectSchema::new()
            .attr(
                "age",
                NumberSchema::new()
                    .maximum(120)
                    .error(ErrorKind::AboveMaximum, "age is not plausible"),
            )
            .into();
        let err = verify(&json!({"age": 200}), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AboveMaximum);
        assert_eq!(err.message(), "age is not plausible");
        assert_eq!(err.path(), "$.age");
    }

    #[test]
    fn test_array_override_applies_to_wrapper_only() {
        let schema: Schema = ArraySchema::new(BoolSchema::new())
            .error(ErrorKind::ArrayElementInvalid, "flags must be booleans")
            .into();
        let err = verify(&json!([1]), &schema).unwrap_err();
        assert_eq!(err.message(), "flags must be booleans");
        assert!(err.root_cause().message().contains("expected bool"));
    }

    #[test]
    fn test_enforce_required() {
        let validator = Validator::new(ValidatorConfig::strict());
        let err = validator.verify(&json!({"age": 3}), &user_schema()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequired);
        assert!(err.message().contains("'name'"));
        assert_eq!(err.path(), "$");
    }

    #[test]
    fn test_depth_limit() {
        let schema: Schema = ObjectSchema::new()
            .attr("a", ObjectSchema::new().attr("b", BoolSchema::new()))
            .into();
        let data = json!({"a": {"b": true}});

        assert!(Validator::new(ValidatorConfig::with_max_depth(3)).verify(&data, &schema).is_ok());

        let err = Validator::new(ValidatorConfig::with_max_depth(2))
            .verify(&data, &schema)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DepthExceeded);
        assert_eq!(err.path(), "$.a.b");
    }

    #[test]
    fn test_collect_reports_every_failure() {
        let validator = Validator::default();
        let doc = json!({
            "name": "X1",
            "age": 200,
            "active": "yes",
            "tags": ["a", 1, 2]
        });
        let errors = validator.collect(&doc, &user_schema());
        let kinds: Vec<ErrorKind> = errors.iter().map(ValidationError::kind).collect();
        assert_eq!(
            kinds,
            [
                ErrorKind::PatternMismatch,
                ErrorKind::AboveMaximum,
                ErrorKind::TypeMismatch,
                ErrorKind::ArrayElementInvalid,
                ErrorKind::ArrayElementInvalid,
            ]
        );
    }

    #[test]
    fn test_collect_first_matches_verify() {
        let validator = Validator::default();
        let doc = json!({"name": "?", "age": -1});
        let first = validator.verify(&doc, &user_schema()).unwrap_err();
        let all = validator.collect(&doc, &user_schema());
        assert_eq!(all.first(), Some(&first));
    }

    #[test]
    fn test_collect_empty_on_success() {
        let errors = Validator::default().collect(&json!({"name": "Bob"}), &user_schema());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_verify_str_decodes_object() {
        assert_eq!(verify_str(r#"{"name": "Alice", "age": 3}"#, &user_schema()), Ok(true));
    }

    #[test]
    fn test_verify_str_rejects_unbracketed_text() {
        let err = verify_str("[1,2]", &user_schema()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert_eq!(err.message(), "json Error");
    }

    #[test]
    fn test_metrics_recorded() {
        let metrics = Arc::new(ValidationMetrics::new());
        let validator = Validator::default().with_metrics(Arc::clone(&metrics));

        let _ = validator.verify(&json!({"name": "Alice"}), &user_schema());
        let _ = validator.verify(&json!({"name": 1}), &user_schema());
        let _ = validator.verify_str("nope", &user_schema());

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.passed, 1);
        assert_eq!(snapshot.failed, 1);
        assert_eq!(snapshot.malformed_inputs, 1);
    }

    fn logged_lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<Value> {
        let text = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        text.lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_failure_logged_with_code_and_path() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let config = ValidatorConfig {
            log_events: true,
            ..ValidatorConfig::default()
        };
        let validator = Validator::new(config).with_log_sink(LogSink::writer(Arc::clone(&buffer)));

        let _ = validator.verify(&json!({"name": 1}), &user_schema());

        let lines = logged_lines(&buffer);
        let failed: Vec<&Value> = lines
            .iter()
            .filter(|line| line["event"] == "VALIDATION_FAILED")
            .collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0]["severity"], "WARN");
        assert_eq!(failed[0]["code"], "SCHEMA_TYPE_MISMATCH");
        assert_eq!(failed[0]["path"], "$.name");
    }

    #[test]
    fn test_rejected_input_logged_at_error() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let config = ValidatorConfig {
            log_events: true,
            ..ValidatorConfig::default()
        };
        let validator = Validator::new(config).with_log_sink(LogSink::writer(Arc::clone(&buffer)));

        let _ = validator.verify_str("nope", &user_schema());

        let lines = logged_lines(&buffer);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["event"], "INPUT_REJECTED");
        assert_eq!(lines[0]["severity"], "ERROR");
    }

    #[test]
    fn test_logging_off_writes_nothing() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let validator = Validator::default().with_log_sink(LogSink::writer(Arc::clone(&buffer)));

        let _ = validator.verify(&json!({"name": 1}), &user_schema());
        assert!(buffer.lock().unwrap().is_empty());
    }

    #[test]
    fn test_preview_truncates_long_values() {
        let long = "x".repeat(200);
        let rendered = preview(&Value::String(long));
        assert_eq!(rendered.chars().count(), PREVIEW_LIMIT);
        assert!(rendered.ends_with("..."));
    }
}
