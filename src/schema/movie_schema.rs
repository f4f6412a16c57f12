//! The movie record schema and the typed entry points built on it.

use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::errors::{ValidationError, ValidationResult};
use super::types::{FieldDef, FieldType, Schema};
use super::validator::SchemaValidator;
use crate::movies::{Genre, MoviePatch, NewMovie};

pub const MIN_YEAR: i64 = 1900;
pub const MAX_YEAR: i64 = 2100;
pub const MIN_RATE: f64 = 0.0;
pub const MAX_RATE: f64 = 10.0;
pub const DEFAULT_RATE: f64 = 5.0;

/// Returns the shared movie schema.
pub fn movie_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(build_movie_schema)
}

fn build_movie_schema() -> Schema {
    Schema::new(
        "movie",
        vec![
            FieldDef::required("title", "Movie title", FieldType::String { min_len: 1 }),
            FieldDef::required(
                "year",
                "Movie year",
                FieldType::Int {
                    min: Some(MIN_YEAR),
                    max: Some(MAX_YEAR),
                },
            ),
            FieldDef::required("director", "Movie director", FieldType::String { min_len: 1 }),
            FieldDef::required(
                "duration",
                "Movie duration",
                FieldType::Int {
                    min: Some(1),
                    max: Some(i64::from(u32::MAX)),
                },
            ),
            FieldDef::required("poster", "Movie poster", FieldType::Url),
            FieldDef::required(
                "genre",
                "Movie genre",
                FieldType::Array {
                    element_type: Box::new(FieldType::Enum {
                        values: Genre::ALL.iter().map(|g| g.as_str()).collect(),
                    }),
                    min_items: 1,
                    max_items: Some(Genre::ALL.len()),
                    unique: true,
                },
            ),
            FieldDef::optional(
                "rate",
                "Movie rate",
                FieldType::Float {
                    min: Some(MIN_RATE),
                    max: Some(MAX_RATE),
                },
            )
            .with_default(Value::from(DEFAULT_RATE)),
        ],
    )
}

/// Validates a create payload into a complete record minus `id`.
pub fn validate_movie(input: &Value) -> ValidationResult<NewMovie> {
    let fields = SchemaValidator::new(movie_schema()).validate_full(input)?;
    into_typed(fields)
}

/// Validates an update payload. Absent fields stay absent.
pub fn validate_partial_movie(input: &Value) -> ValidationResult<MoviePatch> {
    let fields = SchemaValidator::new(movie_schema()).validate_partial(input)?;
    into_typed(fields)
}

fn into_typed<T: DeserializeOwned>(fields: Map<String, Value>) -> ValidationResult<T> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ValidationError::malformed_body(e.to_string()))
}
