//! In-memory movie store
//!
//! An ordered sequence of movies guarded by a single `RwLock`. Reads take the
//! shared lock and return owned snapshots; every mutation holds the exclusive
//! lock for its whole find-then-mutate step, so there is at most one writer
//! and no reader observes a half-applied change.
//!
//! Nothing is persisted: a new store starts from whatever seed it is given.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use super::model::{Movie, MoviePatch, NewMovie};

#[derive(Debug, Default)]
pub struct MovieStore {
    movies: RwLock<Vec<Movie>>,
}

impl MovieStore {
    /// Create a store holding `movies` in the given order
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies: RwLock::new(movies),
        }
    }

    /// Create an empty store
    pub fn empty() -> Self {
        Self::default()
    }

    // The guarded data is plain values, so a panic in another holder cannot
    // leave it logically torn; recover instead of propagating the poison.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Movie>> {
        self.movies.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Movie>> {
        self.movies.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================
    // Reads
    // ==================

    /// Snapshot of every movie, in insertion order
    pub fn list(&self) -> Vec<Movie> {
        self.read().clone()
    }

    /// Movies having a genre equal to `genre` ignoring case.
    ///
    /// `None` or an empty string means no filter.
    pub fn list_by_genre(&self, genre: Option<&str>) -> Vec<Movie> {
        match genre.filter(|g| !g.is_empty()) {
            Some(genre) => self
                .read()
                .iter()
                .filter(|movie| movie.has_genre(genre))
                .cloned()
                .collect(),
            None => self.list(),
        }
    }

    pub fn find_by_id(&self, id: &Uuid) -> Option<Movie> {
        self.read().iter().find(|movie| movie.id == *id).cloned()
    }

    pub fn find_index_by_id(&self, id: &Uuid) -> Option<usize> {
        self.read().iter().position(|movie| movie.id == *id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // ==================
    // Positional mutations
    // ==================

    pub fn append(&self, movie: Movie) {
        self.write().push(movie);
    }

    /// Replace the movie at `index`, returning the previous one.
    ///
    /// Returns `None` and changes nothing when `index` is out of range.
    pub fn replace_at(&self, index: usize, movie: Movie) -> Option<Movie> {
        let mut movies = self.write();
        let slot = movies.get_mut(index)?;
        Some(std::mem::replace(slot, movie))
    }

    /// Remove the movie at `index`, preserving the order of the rest
    pub fn remove_at(&self, index: usize) -> Option<Movie> {
        let mut movies = self.write();
        if index < movies.len() {
            Some(movies.remove(index))
        } else {
            None
        }
    }

    // ==================
    // Atomic compound operations
    // ==================

    /// Assign a fresh random id to `new` and append it
    pub fn insert_new(&self, new: NewMovie) -> Movie {
        let mut movies = self.write();

        let mut id = Uuid::new_v4();
        while movies.iter().any(|movie| movie.id == id) {
            id = Uuid::new_v4();
        }

        let movie = Movie::from_new(id, new);
        movies.push(movie.clone());
        movie
    }

    /// Merge `patch` into the movie with `id`, returning the merged record
    pub fn update(&self, id: &Uuid, patch: MoviePatch) -> Option<Movie> {
        let mut movies = self.write();
        let movie = movies.iter_mut().find(|movie| movie.id == *id)?;
        movie.apply(patch);
        Some(movie.clone())
    }

    /// Remove the movie with `id`, returning it
    pub fn remove(&self, id: &Uuid) -> Option<Movie> {
        let mut movies = self.write();
        let index = movies.iter().position(|movie| movie.id == *id)?;
        Some(movies.remove(index))
    }
}
