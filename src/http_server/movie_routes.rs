//! Movie HTTP Routes
//!
//! Endpoints for listing, reading, creating, patching and deleting movies.
//! Each handler runs Received -> Validated -> StoreAccessed -> Responded and
//! never touches the store before the payload has passed validation.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use super::errors::{ApiError, ApiResult, MessageResponse};
use super::origin::OriginGate;
use crate::movies::{Movie, MovieStore};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{validate_movie, validate_partial_movie, ValidationError};

pub const DELETED_MESSAGE: &str = "Movie deleted";

// ==================
// Shared State
// ==================

/// Movie state shared across handlers
pub struct MoviesState {
    pub store: MovieStore,
    pub origin_gate: OriginGate,
}

impl MoviesState {
    pub fn new(store: MovieStore, origin_gate: OriginGate) -> Self {
        Self { store, origin_gate }
    }
}

// ==================
// Request Types
// ==================

/// Query parameters accepted by the list endpoint
#[derive(Debug, Default, PartialEq)]
pub struct ListMoviesQuery {
    pub genre: Option<String>,
}

impl ListMoviesQuery {
    /// Build from raw query pairs. The first `genre` wins and anything else
    /// is ignored, so a list request never fails on its query string.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let genre = pairs
            .into_iter()
            .find(|(key, _)| key == "genre")
            .map(|(_, value)| value);
        Self { genre }
    }
}

// ==================
// Movie Routes
// ==================

/// Create movie routes
pub fn movie_routes(state: Arc<MoviesState>) -> Router {
    Router::new()
        .route("/movies", get(list_movies_handler).post(create_movie_handler))
        .route(
            "/movies/:id",
            get(get_movie_handler)
                .patch(update_movie_handler)
                .delete(delete_movie_handler)
                .options(preflight_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// A path id that is not a UUID cannot name a stored movie
fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}

/// Unwrap a JSON body, turning decode failures into a validation error
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ValidationError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ValidationError::malformed_body(rejection.body_text()))
}

fn rejected(route: &str, err: ValidationError) -> ApiError {
    let count = err.violations().len().to_string();
    log_event_with_fields(
        Event::ValidationRejected,
        &[("route", route), ("violations", &count)],
    );
    ApiError::Validation(err)
}

// ==================
// Read Handlers
// ==================

async fn list_movies_handler(
    State(state): State<Arc<MoviesState>>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (HeaderMap, Json<Vec<Movie>>) {
    let query = ListMoviesQuery::from_pairs(pairs);
    let cors = state.origin_gate.response_headers(&headers);
    let movies = state.store.list_by_genre(query.genre.as_deref());
    (cors, Json(movies))
}

async fn get_movie_handler(
    State(state): State<Arc<MoviesState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Movie>> {
    let id = parse_id(&id)?;
    state.store.find_by_id(&id).map(Json).ok_or(ApiError::NotFound)
}

// ==================
// Write Handlers
// ==================

async fn create_movie_handler(
    State(state): State<Arc<MoviesState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Movie>)> {
    let new = json_body(body)
        .and_then(|payload| validate_movie(&payload))
        .map_err(|e| rejected("create", e))?;

    let movie = state.store.insert_new(new);
    log_event_with_fields(
        Event::MovieCreated,
        &[("id", &movie.id.to_string()), ("title", &movie.title)],
    );

    Ok((StatusCode::CREATED, Json(movie)))
}

async fn update_movie_handler(
    State(state): State<Arc<MoviesState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Movie>> {
    let patch = json_body(body)
        .and_then(|payload| validate_partial_movie(&payload))
        .map_err(|e| rejected("update", e))?;

    let id = parse_id(&id)?;
    let fields = patch.field_names().join(",");
    let movie = state.store.update(&id, patch).ok_or(ApiError::NotFound)?;
    log_event_with_fields(
        Event::MovieUpdated,
        &[("id", &movie.id.to_string()), ("fields", &fields)],
    );

    Ok(Json(movie))
}

async fn delete_movie_handler(
    State(state): State<Arc<MoviesState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (HeaderMap, ApiResult<Json<MessageResponse>>) {
    let cors = state.origin_gate.response_headers(&headers);

    let result = parse_id(&id).and_then(|id| state.store.remove(&id).ok_or(ApiError::NotFound));
    let result = result.map(|movie| {
        log_event_with_fields(Event::MovieDeleted, &[("id", &movie.id.to_string())]);
        Json(MessageResponse::new(DELETED_MESSAGE))
    });

    (cors, result)
}

/// Preflight always answers 200; allow headers only for listed origins
async fn preflight_handler(
    State(state): State<Arc<MoviesState>>,
    headers: HeaderMap,
) -> (StatusCode, HeaderMap) {
    (StatusCode::OK, state.origin_gate.preflight_headers(&headers))
}
