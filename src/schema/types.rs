//! Field schema definitions
//!
//! Supported types:
//! - string: UTF-8 string with a minimum length
//! - int: 64-bit signed integer with optional bounds (integral floats accepted)
//! - float: 64-bit floating point with optional bounds (integers accepted)
//! - url: absolute URL string
//! - enum: string drawn from a fixed set of values
//! - array: array with a single element type

use serde_json::Value;

/// Supported field types
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// UTF-8 string of at least `min_len` characters
    String { min_len: usize },
    /// 64-bit signed integer
    Int { min: Option<i64>, max: Option<i64> },
    /// 64-bit floating point
    Float { min: Option<f64>, max: Option<f64> },
    /// Absolute URL (`scheme://authority...`)
    Url,
    /// One of a fixed set of string values, matched exactly
    Enum { values: Vec<&'static str> },
    /// Array with a single element type
    Array {
        element_type: Box<FieldType>,
        min_items: usize,
        /// Longest accepted array; longer arrays are rejected without
        /// inspecting their elements
        max_items: Option<usize>,
        /// Whether elements must be distinct
        unique: bool,
    },
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String { .. } => "string",
            FieldType::Int { .. } => "integer",
            FieldType::Float { .. } => "number",
            FieldType::Url => "string",
            FieldType::Enum { .. } => "string",
            FieldType::Array { .. } => "array",
        }
    }
}

/// A single field of a schema
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// JSON key
    pub name: &'static str,
    /// Human-readable label used in violation messages (e.g. "Movie title")
    pub label: &'static str,
    /// Field data type and constraints
    pub field_type: FieldType,
    /// Whether the field must be present in a full payload
    pub required: bool,
    /// Value filled in by full validation when the field is absent
    pub default: Option<Value>,
}

impl FieldDef {
    /// Create a required field
    pub fn required(name: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            label,
            field_type,
            required: true,
            default: None,
        }
    }

    /// Create an optional field
    pub fn optional(name: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            label,
            field_type,
            required: false,
            default: None,
        }
    }

    /// Attach a default value; the field becomes optional
    pub fn with_default(mut self, default: Value) -> Self {
        self.required = false;
        self.default = Some(default);
        self
    }
}

/// Ordered set of field definitions
///
/// Field order is the order violations are reported in.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new(name: &'static str, fields: Vec<FieldDef>) -> Self {
        Self { name, fields }
    }

    /// Looks up a field definition by key
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if `name` is a declared field
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Validates the schema structure itself (not a document)
    pub fn validate_structure(&self) -> Result<(), String> {
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(format!("Field '{}' declared twice", field.name));
            }
            if field.required && field.default.is_some() {
                return Err(format!("Required field '{}' cannot carry a default", field.name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> Schema {
        Schema::new(
            "users",
            vec![
                FieldDef::required("name", "Name", FieldType::String { min_len: 1 }),
                FieldDef::optional("age", "Age", FieldType::Int { min: Some(0), max: None }),
            ],
        )
    }

    #[test]
    fn test_schema_structure_valid() {
        assert!(sample_schema().validate_structure().is_ok());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let schema = Schema::new(
            "users",
            vec![
                FieldDef::required("name", "Name", FieldType::String { min_len: 1 }),
                FieldDef::optional("name", "Name", FieldType::String { min_len: 0 }),
            ],
        );
        let result = schema.validate_structure();
        assert!(result.unwrap_err().contains("twice"));
    }

    #[test]
    fn test_with_default_makes_field_optional() {
        let field = FieldDef::required("rate", "Rate", FieldType::Float { min: None, max: None })
            .with_default(json!(5));
        assert!(!field.required);
        assert_eq!(field.default, Some(json!(5)));
    }

    #[test]
    fn test_field_lookup() {
        let schema = sample_schema();
        assert!(schema.declares("age"));
        assert!(!schema.declares("id"));
        assert_eq!(schema.field("name").unwrap().label, "Name");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(FieldType::Url.type_name(), "string");
        let arr = FieldType::Array {
            element_type: Box::new(FieldType::String { min_len: 0 }),
            min_items: 1,
            max_items: None,
            unique: true,
        };
        assert_eq!(arr.type_name(), "array");
    }
}
