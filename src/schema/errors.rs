//! Validation error types
//!
//! A failed validation carries every violation found, never a single opaque
//! message. Violation codes:
//! - required
//! - invalid_type
//! - too_small
//! - too_big
//! - invalid_url
//! - invalid_enum_value
//! - duplicate_value

use std::fmt;

use serde::Serialize;

/// Violation codes, serialized in snake_case on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// Required field absent
    Required,
    /// Value has the wrong JSON type
    InvalidType,
    /// Below the minimum (length, value or item count)
    TooSmall,
    /// Above the maximum
    TooBig,
    /// String is not an absolute URL
    InvalidUrl,
    /// String is not one of the allowed values
    InvalidEnumValue,
    /// Array element repeats an earlier one
    DuplicateValue,
}

impl ViolationCode {
    /// Returns the wire code
    pub fn code(&self) -> &'static str {
        match self {
            ViolationCode::Required => "required",
            ViolationCode::InvalidType => "invalid_type",
            ViolationCode::TooSmall => "too_small",
            ViolationCode::TooBig => "too_big",
            ViolationCode::InvalidUrl => "invalid_url",
            ViolationCode::InvalidEnumValue => "invalid_enum_value",
            ViolationCode::DuplicateValue => "duplicate_value",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One step of a field path: an object key or an array index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// A single field-level violation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub code: ViolationCode,
    /// Path from the payload root; empty for the root itself
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl FieldViolation {
    pub fn new(code: ViolationCode, path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            code,
            path,
            message: message.into(),
        }
    }

    /// Violation on the payload root
    pub fn root(code: ViolationCode, message: impl Into<String>) -> Self {
        Self::new(code, Vec::new(), message)
    }

    /// Dotted rendering of the path, e.g. `genre[1]`
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            if let PathSegment::Key(_) = segment {
                if !out.is_empty() {
                    out.push('.');
                }
            }
            out.push_str(&segment.to_string());
        }
        out
    }

    /// Returns true if the violation's first path segment is `field`
    pub fn is_for(&self, field: &str) -> bool {
        matches!(self.path.first(), Some(PathSegment::Key(k)) if k == field)
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path_string();
        if path.is_empty() {
            write!(f, "{}: {}", self.code, self.message)
        } else {
            write!(f, "field '{}': {}: {}", path, self.code, self.message)
        }
    }
}

/// Payload failed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Build from a non-empty violation list
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self { violations }
    }

    /// Body could not be decoded as a JSON object
    pub fn malformed_body(reason: impl Into<String>) -> Self {
        Self::new(vec![FieldViolation::root(ViolationCode::InvalidType, reason)])
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    /// Returns the violations reported against `field`
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> {
        self.violations.iter().filter(move |v| v.is_for(field))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed with {} violation(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "; {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;
