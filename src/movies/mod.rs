//! Movie records and the in-memory collection holding them
//!
//! The collection is process-scoped: it is built once at boot from the seed
//! dataset and never written back anywhere.

mod model;
mod seed;
mod store;

pub use model::{Genre, Movie, MoviePatch, NewMovie};
pub use seed::{
    embedded_seed, load_seed, load_seed_file, parse_seed, SeedError, SeedResult, EMBEDDED_SEED,
};
pub use store::MovieStore;
