//! Schema validation for incoming movie payloads
//!
//! # Design Principles
//!
//! - The schema is data: an ordered table of typed, constrained fields
//! - Validation is a pure function returning a tagged result
//! - Errors are itemized per field, never a single opaque message
//! - Validation happens strictly before any store access

mod errors;
mod movie_schema;
mod types;
mod validator;

pub use errors::{FieldViolation, PathSegment, ValidationError, ValidationResult, ViolationCode};
pub use movie_schema::{
    movie_schema, validate_movie, validate_partial_movie, DEFAULT_RATE, MAX_RATE, MAX_YEAR,
    MIN_RATE, MIN_YEAR,
};
pub use types::{FieldDef, FieldType, Schema};
pub use validator::{is_absolute_url, json_type_name, Mode, SchemaValidator};
