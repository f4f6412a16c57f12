//! movies-api - An in-memory movie catalogue served over HTTP
//!
//! Listing with a genre filter, lookup by id, creation, partial update and
//! deletion, with an exact-match cross-origin allow-list.

pub mod cli;
pub mod http_server;
pub mod movies;
pub mod observability;
pub mod schema;
