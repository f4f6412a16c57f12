//! # Movies HTTP Server Module
//!
//! Maps verbs and paths onto the movie handlers, decodes JSON bodies at the
//! boundary and encodes JSON responses.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /movies[?genre=]` - List, optionally filtered by genre
//! - `POST /movies` - Create
//! - `GET /movies/:id` - Read one
//! - `PATCH /movies/:id` - Partial update
//! - `DELETE /movies/:id` - Delete
//! - `OPTIONS /movies/:id` - Cross-origin preflight

pub mod config;
pub mod errors;
pub mod health_routes;
pub mod movie_routes;
pub mod origin;
pub mod request_log;
pub mod server;

pub use config::{ConfigError, HttpServerConfig, PORT_ENV};
pub use errors::{ApiError, ApiResult, MessageResponse, NOT_FOUND_MESSAGE};
pub use movie_routes::{MoviesState, DELETED_MESSAGE};
pub use origin::{OriginDecision, OriginGate, ALLOWED_METHODS};
pub use server::{app, HttpServer};
