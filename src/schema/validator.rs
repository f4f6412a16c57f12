//! Schema validator for incoming payloads
//!
//! Validation semantics:
//! - Full: every required field present and well-typed, defaults applied
//! - Partial: any subset of fields, each checked if present, no defaults
//! - Undeclared fields are dropped from the output, never copied through
//! - Null is a type mismatch, never "absent"
//! - No implicit coercion (a string "2010" is not an integer); an integral
//!   float such as 2010.0 is an integer and is stored as one
//! - Every violation is collected; validation does not stop at the first

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::errors::{FieldViolation, PathSegment, ValidationError, ValidationResult, ViolationCode};
use super::types::{FieldType, Schema};

/// Validation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Complete record: required fields enforced, defaults filled in
    Full,
    /// Patch: only present fields are checked
    Partial,
}

/// Evaluates payloads against a schema.
///
/// The validator is pure: it never mutates its input and the same payload
/// always yields the same result.
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validates a complete payload.
    ///
    /// Returns the declared fields only, with defaults applied for absent
    /// optional fields that carry one.
    pub fn validate_full(&self, document: &Value) -> ValidationResult<Map<String, Value>> {
        self.validate(document, Mode::Full)
    }

    /// Validates a partial payload. An empty object is valid.
    pub fn validate_partial(&self, document: &Value) -> ValidationResult<Map<String, Value>> {
        self.validate(document, Mode::Partial)
    }

    pub fn validate(&self, document: &Value, mode: Mode) -> ValidationResult<Map<String, Value>> {
        let obj = document.as_object().ok_or_else(|| {
            ValidationError::malformed_body(format!(
                "Expected object, received {}",
                json_type_name(document)
            ))
        })?;

        let mut violations = Vec::new();
        let mut accepted = Map::new();

        for field in &self.schema.fields {
            let path = vec![PathSegment::Key(field.name.to_string())];

            match obj.get(field.name) {
                Some(value) => {
                    let before = violations.len();
                    check_value(field.label, &field.field_type, value, &path, &mut violations);
                    if violations.len() == before {
                        accepted.insert(field.name.to_string(), normalize(&field.field_type, value));
                    }
                }
                None if mode == Mode::Full => {
                    if let Some(default) = &field.default {
                        accepted.insert(field.name.to_string(), default.clone());
                    } else if field.required {
                        violations.push(FieldViolation::new(
                            ViolationCode::Required,
                            path,
                            format!("{} is required", field.label),
                        ));
                    }
                }
                None => {}
            }
        }

        if violations.is_empty() {
            Ok(accepted)
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

/// Checks one value against a field type, appending any violations.
fn check_value(
    label: &str,
    field_type: &FieldType,
    value: &Value,
    path: &[PathSegment],
    violations: &mut Vec<FieldViolation>,
) {
    let mut push = |code: ViolationCode, message: String| {
        violations.push(FieldViolation::new(code, path.to_vec(), message));
    };

    match field_type {
        FieldType::String { min_len } => {
            let Some(s) = value.as_str() else {
                return push(ViolationCode::InvalidType, type_message(label, field_type, value));
            };
            if s.trim().chars().count() < *min_len {
                push(
                    ViolationCode::TooSmall,
                    format!("{} must contain at least {} character(s)", label, min_len),
                );
            }
        }
        FieldType::Int { min, max } => {
            let n = match value.as_i64() {
                Some(n) => n,
                None if value.is_u64() => {
                    return push(ViolationCode::TooBig, format!("{} is out of range", label));
                }
                None => match integral_float(value) {
                    Some(Some(n)) => n,
                    Some(None) => {
                        return push(ViolationCode::TooBig, format!("{} is out of range", label));
                    }
                    None => {
                        return push(
                            ViolationCode::InvalidType,
                            type_message(label, field_type, value),
                        );
                    }
                },
            };
            if let Some(min) = min {
                if n < *min {
                    push(
                        ViolationCode::TooSmall,
                        format!("{} must be greater than or equal to {}", label, min),
                    );
                }
            }
            if let Some(max) = max {
                if n > *max {
                    push(
                        ViolationCode::TooBig,
                        format!("{} must be less than or equal to {}", label, max),
                    );
                }
            }
        }
        FieldType::Float { min, max } => {
            let Some(n) = value.as_f64() else {
                return push(ViolationCode::InvalidType, type_message(label, field_type, value));
            };
            if let Some(min) = min {
                if n < *min {
                    push(
                        ViolationCode::TooSmall,
                        format!("{} must be greater than or equal to {}", label, min),
                    );
                }
            }
            if let Some(max) = max {
                if n > *max {
                    push(
                        ViolationCode::TooBig,
                        format!("{} must be less than or equal to {}", label, max),
                    );
                }
            }
        }
        FieldType::Url => {
            let Some(s) = value.as_str() else {
                return push(ViolationCode::InvalidType, type_message(label, field_type, value));
            };
            if !is_absolute_url(s) {
                push(ViolationCode::InvalidUrl, format!("{} must be a valid URL", label));
            }
        }
        FieldType::Enum { values } => {
            let Some(s) = value.as_str() else {
                return push(ViolationCode::InvalidType, type_message(label, field_type, value));
            };
            if !values.iter().any(|v| *v == s) {
                push(
                    ViolationCode::InvalidEnumValue,
                    format!(
                        "{} must be one of: {}; received '{}'",
                        label,
                        values.join(", "),
                        s
                    ),
                );
            }
        }
        FieldType::Array {
            element_type,
            min_items,
            max_items,
            unique,
        } => {
            let Some(items) = value.as_array() else {
                return push(ViolationCode::InvalidType, type_message(label, field_type, value));
            };
            if items.len() < *min_items {
                push(
                    ViolationCode::TooSmall,
                    format!("{} must contain at least {} item(s)", label, min_items),
                );
            }
            if let Some(max) = max_items {
                if items.len() > *max {
                    return push(
                        ViolationCode::TooBig,
                        format!("{} must contain at most {} item(s)", label, max),
                    );
                }
            }

            let mut seen = HashSet::new();
            for (i, item) in items.iter().enumerate() {
                let mut item_path = path.to_vec();
                item_path.push(PathSegment::Index(i));

                let before = violations.len();
                check_value(label, element_type, item, &item_path, violations);
                if violations.len() > before || !*unique {
                    continue;
                }

                // JSON text identifies a well-typed element
                if !seen.insert(item.to_string()) {
                    violations.push(FieldViolation::new(
                        ViolationCode::DuplicateValue,
                        item_path,
                        format!("{} must not contain duplicates", label),
                    ));
                }
            }
        }
    }
}

/// Reads an integral float as an integer.
///
/// `None` when the value is not an integral number, `Some(None)` when it is
/// integral but outside the exactly representable range.
fn integral_float(value: &Value) -> Option<Option<i64>> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    let n = value.as_f64().filter(|n| n.fract() == 0.0)?;
    Some((n.abs() <= MAX_SAFE_INTEGER).then_some(n as i64))
}

/// Stores integral floats accepted for integer fields as integers.
fn normalize(field_type: &FieldType, value: &Value) -> Value {
    match field_type {
        FieldType::Int { .. } if !value.is_i64() && !value.is_u64() => integral_float(value)
            .flatten()
            .map(Value::from)
            .unwrap_or_else(|| value.clone()),
        _ => value.clone(),
    }
}

fn type_message(label: &str, expected: &FieldType, actual: &Value) -> String {
    let name = expected.type_name();
    let article = if name.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "an"
    } else {
        "a"
    };
    format!(
        "{} must be {} {}, received {}",
        label,
        article,
        name,
        json_type_name(actual)
    )
}

/// Returns true for `scheme://authority[/path][?query][#fragment]` with no
/// whitespace anywhere.
pub fn is_absolute_url(candidate: &str) -> bool {
    static URL_PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = URL_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+(?:[/?#]\S*)?$")
            .expect("URL pattern is a valid regex")
    });
    pattern.is_match(candidate)
}

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
