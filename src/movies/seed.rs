//! Seed dataset loading
//!
//! The store starts from a JSON array of complete movie records. The default
//! dataset is compiled into the binary; an alternate file can be supplied at
//! boot. Every record goes through the same validation as a create payload,
//! plus an id check, so a bad seed fails the boot instead of serving data the
//! API itself would reject.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use super::model::Movie;
use crate::schema::{validate_movie, ValidationError};

/// The bundled dataset
pub const EMBEDDED_SEED: &str = include_str!("../../data/movies.json");

/// Result type for seed loading
pub type SeedResult<T> = Result<T, SeedError>;

/// Seed loading errors
#[derive(Debug, Error)]
pub enum SeedError {
    /// File could not be read
    #[error("Failed to read seed file '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Not a JSON array
    #[error("Invalid seed JSON: {0}")]
    InvalidJson(String),

    /// A record is missing a usable id
    #[error("Seed record {index}: invalid id: {reason}")]
    InvalidId { index: usize, reason: String },

    /// A record fails the movie schema
    #[error("Seed record {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// Two records share an id
    #[error("Seed record {index}: duplicate id {id}")]
    DuplicateId { index: usize, id: Uuid },
}

/// Parse the bundled dataset
pub fn embedded_seed() -> SeedResult<Vec<Movie>> {
    parse_seed(EMBEDDED_SEED)
}

/// Read and parse a seed file
pub fn load_seed_file(path: &Path) -> SeedResult<Vec<Movie>> {
    let content = fs::read_to_string(path).map_err(|source| SeedError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;
    parse_seed(&content)
}

/// Parse the bundled dataset, or `path` when given
pub fn load_seed(path: Option<&Path>) -> SeedResult<Vec<Movie>> {
    match path {
        Some(path) => load_seed_file(path),
        None => embedded_seed(),
    }
}

/// Parse a JSON array of movie records, preserving order
pub fn parse_seed(content: &str) -> SeedResult<Vec<Movie>> {
    let records: Vec<Value> =
        serde_json::from_str(content).map_err(|e| SeedError::InvalidJson(e.to_string()))?;

    let mut seen = HashSet::with_capacity(records.len());
    let mut movies = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let id = record_id(index, record)?;
        if !seen.insert(id) {
            return Err(SeedError::DuplicateId { index, id });
        }

        let new = validate_movie(record).map_err(|source| SeedError::InvalidRecord { index, source })?;
        movies.push(Movie::from_new(id, new));
    }

    Ok(movies)
}

fn record_id(index: usize, record: &Value) -> SeedResult<Uuid> {
    let raw = record
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| SeedError::InvalidId {
            index,
            reason: "missing or not a string".to_string(),
        })?;

    Uuid::parse_str(raw).map_err(|e| SeedError::InvalidId {
        index,
        reason: e.to_string(),
    })
}
