//! Movie Validation Tests
//!
//! Validation rules through the public API:
//! - Full payloads need every required field, rate defaults
//! - Partial payloads accept any subset, never default
//! - Undeclared fields are dropped
//! - Violations are itemized per field
//! - Validation is deterministic

use movies_api::movies::{Genre, Movie, MoviePatch};
use movies_api::schema::{
    movie_schema, validate_movie, validate_partial_movie, ViolationCode, DEFAULT_RATE, MAX_YEAR,
    MIN_YEAR,
};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use uuid::Uuid;

// =============================================================================
// Helper Functions
// =============================================================================

fn valid_payload() -> Value {
    json!({
        "title": "Gladiator",
        "year": 2000,
        "director": "Ridley Scott",
        "duration": 155,
        "poster": "https://example.com/gladiator.jpg",
        "genre": ["Action", "Adventure", "Drama"],
        "rate": 8.5
    })
}

fn without(field: &str) -> Value {
    let mut payload = valid_payload();
    payload.as_object_mut().unwrap().remove(field);
    payload
}

// =============================================================================
// Full Validation Tests
// =============================================================================

/// Each required field, when missing, is reported against that field.
#[test]
fn test_each_required_field_reported() {
    for field in ["title", "year", "director", "duration", "poster", "genre"] {
        let err = validate_movie(&without(field)).unwrap_err();
        let hits: Vec<_> = err.for_field(field).collect();
        assert_eq!(hits.len(), 1, "field {}", field);
        assert_eq!(hits[0].code, ViolationCode::Required);
    }
}

/// Rate is optional on create and defaults.
#[test]
fn test_rate_optional_with_default() {
    let movie = validate_movie(&without("rate")).unwrap();
    assert_eq!(movie.rate, DEFAULT_RATE);
}

/// Year bounds are inclusive.
#[test]
fn test_year_bounds_inclusive() {
    for year in [MIN_YEAR, MAX_YEAR] {
        let mut payload = valid_payload();
        payload["year"] = json!(year);
        assert!(validate_movie(&payload).is_ok(), "year {}", year);
    }
}

/// Genre must be a non-empty set of catalogue values.
#[test]
fn test_genre_rules() {
    let mut payload = valid_payload();

    payload["genre"] = json!("Action");
    assert_eq!(
        validate_movie(&payload).unwrap_err().violations()[0].code,
        ViolationCode::InvalidType
    );

    payload["genre"] = json!(["Action", "Action"]);
    assert_eq!(
        validate_movie(&payload).unwrap_err().violations()[0].code,
        ViolationCode::DuplicateValue
    );

    payload["genre"] = json!(["action"]);
    assert_eq!(
        validate_movie(&payload).unwrap_err().violations()[0].code,
        ViolationCode::InvalidEnumValue
    );

    payload["genre"] = json!(["Sci-Fi", "Thriller"]);
    assert_eq!(
        validate_movie(&payload).unwrap().genre,
        vec![Genre::SciFi, Genre::Thriller]
    );
}

/// A genre list longer than the catalogue is rejected as a whole, without
/// walking its elements.
#[test]
fn test_oversized_genre_rejected_quickly() {
    let mut payload = valid_payload();
    payload["genre"] = Value::Array((0..200_000).map(|n| json!(n)).collect());

    let started = Instant::now();
    let err = validate_movie(&payload).unwrap_err();
    assert!(started.elapsed() < Duration::from_secs(1));

    let hits: Vec<_> = err.for_field("genre").collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].code, ViolationCode::TooBig);
}

/// Every catalogue genre at once is still a valid list.
#[test]
fn test_full_catalogue_accepted() {
    let mut payload = valid_payload();
    payload["genre"] = Value::Array(Genre::ALL.iter().map(|g| json!(g.as_str())).collect());
    assert_eq!(validate_movie(&payload).unwrap().genre.len(), Genre::ALL.len());
}

/// Integral numbers written with a fraction are integers.
#[test]
fn test_integral_float_year_and_duration() {
    let mut payload = valid_payload();
    payload["year"] = json!(2000.0);
    payload["duration"] = json!(155.0);
    let movie = validate_movie(&payload).unwrap();
    assert_eq!(movie.year, 2000);
    assert_eq!(movie.duration, 155);

    payload["year"] = json!(2000.5);
    let err = validate_movie(&payload).unwrap_err();
    assert_eq!(err.for_field("year").next().unwrap().code, ViolationCode::InvalidType);
}

/// Poster must be an absolute URL.
#[test]
fn test_poster_must_be_url() {
    let mut payload = valid_payload();
    payload["poster"] = json!("gladiator.jpg");
    let err = validate_movie(&payload).unwrap_err();
    assert_eq!(err.violations()[0].code, ViolationCode::InvalidUrl);
}

/// Blank strings do not satisfy required text fields.
#[test]
fn test_blank_title_rejected() {
    let mut payload = valid_payload();
    payload["title"] = json!("   ");
    let err = validate_movie(&payload).unwrap_err();
    assert_eq!(err.violations()[0].code, ViolationCode::TooSmall);
}

// =============================================================================
// Partial Validation Tests
// =============================================================================

/// Any single field is a valid patch on its own.
#[test]
fn test_single_field_patches() {
    let full = valid_payload();
    for (key, value) in full.as_object().unwrap() {
        let mut single = serde_json::Map::new();
        single.insert(key.clone(), value.clone());
        let patch = validate_partial_movie(&Value::Object(single)).unwrap();
        assert_eq!(patch.field_names(), vec![key.as_str()]);
    }
}

/// An empty patch is valid and changes nothing.
#[test]
fn test_empty_patch_valid() {
    let patch = validate_partial_movie(&json!({})).unwrap();
    assert_eq!(patch, MoviePatch::default());
}

/// Present fields are still checked in a patch.
#[test]
fn test_patch_fields_checked() {
    let err = validate_partial_movie(&json!({ "duration": 0, "title": 5 })).unwrap_err();
    assert_eq!(err.violations().len(), 2);
    assert_eq!(err.for_field("title").next().unwrap().code, ViolationCode::InvalidType);
    assert_eq!(err.for_field("duration").next().unwrap().code, ViolationCode::TooSmall);
}

/// Applying a validated patch merges shallowly and keeps the id.
#[test]
fn test_patch_applies_shallowly() {
    let id = Uuid::new_v4();
    let mut movie = Movie::from_new(id, validate_movie(&valid_payload()).unwrap());
    let before = movie.clone();

    let patch = validate_partial_movie(&json!({ "id": Uuid::new_v4().to_string(), "genre": ["Drama"] }))
        .unwrap();
    movie.apply(patch);

    assert_eq!(movie.id, id);
    assert_eq!(movie.genre, vec![Genre::Drama]);
    assert_eq!(movie.title, before.title);
    assert_eq!(movie.rate, before.rate);
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Same payload, same verdict, same violation order.
#[test]
fn test_validation_is_deterministic() {
    let bad = json!({ "title": "", "year": "x", "genre": [] });
    let first = validate_movie(&bad).unwrap_err();
    for _ in 0..50 {
        assert_eq!(validate_movie(&bad).unwrap_err(), first);
    }
}

/// Violations follow schema field order.
#[test]
fn test_violation_order_follows_schema() {
    let err = validate_movie(&json!({})).unwrap_err();
    let reported: Vec<_> = err.violations().iter().map(|v| v.path_string()).collect();
    let required: Vec<_> = movie_schema()
        .fields
        .iter()
        .filter(|f| f.required)
        .map(|f| f.name.to_string())
        .collect();
    assert_eq!(reported, required);
}
