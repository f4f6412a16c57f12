//! Movie record types
//!
//! Field names on the wire: id, title, year, director, duration, poster,
//! genre, rate.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Genre catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Biography,
    Comedy,
    Crime,
    Drama,
    Fantasy,
    Horror,
    Romance,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Thriller,
}

impl Genre {
    pub const ALL: [Genre; 12] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Biography,
        Genre::Comedy,
        Genre::Crime,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Horror,
        Genre::Romance,
        Genre::SciFi,
        Genre::Thriller,
    ];

    /// Wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Biography => "Biography",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Thriller => "Thriller",
        }
    }

    /// Case-insensitive exact match against the wire spelling
    pub fn matches(&self, query: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(query)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Assigned at creation, never reassigned
    pub id: Uuid,
    pub title: String,
    pub year: i32,
    pub director: String,
    /// Minutes
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<Genre>,
    pub rate: f64,
}

impl Movie {
    /// Builds a record from a validated payload and a server-chosen id
    pub fn from_new(id: Uuid, new: NewMovie) -> Self {
        Self {
            id,
            title: new.title,
            year: new.year,
            director: new.director,
            duration: new.duration,
            poster: new.poster,
            genre: new.genre,
            rate: new.rate,
        }
    }

    /// Shallow merge: present patch fields overwrite, absent ones keep
    /// their prior value. `id` is untouched.
    pub fn apply(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(director) = patch.director {
            self.director = director;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(poster) = patch.poster {
            self.poster = poster;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
    }

    pub fn has_genre(&self, query: &str) -> bool {
        self.genre.iter().any(|g| g.matches(query))
    }
}

/// A validated create payload (everything but `id`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<Genre>,
    pub rate: f64,
}

/// A validated update payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<Genre>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

impl MoviePatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self == &MoviePatch::default()
    }

    /// Names of the fields this patch sets
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.title.is_some() {
            names.push("title");
        }
        if self.year.is_some() {
            names.push("year");
        }
        if self.director.is_some() {
            names.push("director");
        }
        if self.duration.is_some() {
            names.push("duration");
        }
        if self.poster.is_some() {
            names.push("poster");
        }
        if self.genre.is_some() {
            names.push("genre");
        }
        if self.rate.is_some() {
            names.push("rate");
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Movie {
        Movie {
            id: Uuid::new_v4(),
            title: "The Matrix".to_string(),
            year: 1999,
            director: "Lana Wachowski".to_string(),
            duration: 136,
            poster: "https://example.com/matrix.jpg".to_string(),
            genre: vec![Genre::Action, Genre::SciFi],
            rate: 8.7,
        }
    }

    #[test]
    fn test_genre_wire_spelling() {
        assert_eq!(serde_json::to_value(Genre::SciFi).unwrap(), json!("Sci-Fi"));
        let parsed: Genre = serde_json::from_value(json!("Sci-Fi")).unwrap();
        assert_eq!(parsed, Genre::SciFi);
        for genre in Genre::ALL {
            assert_eq!(serde_json::to_value(genre).unwrap(), json!(genre.as_str()));
        }
    }

    #[test]
    fn test_genre_match_ignores_case() {
        assert!(Genre::SciFi.matches("sci-fi"));
        assert!(Genre::Action.matches("ACTION"));
        assert!(!Genre::SciFi.matches("scifi"));
    }

    #[test]
    fn test_movie_serializes_id_as_string() {
        let movie = sample();
        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["id"], json!(movie.id.to_string()));
        assert_eq!(value["genre"], json!(["Action", "Sci-Fi"]));
    }

    #[test]
    fn test_apply_merges_shallowly() {
        let mut movie = sample();
        let before = movie.clone();

        movie.apply(MoviePatch {
            year: Some(2000),
            genre: Some(vec![Genre::Drama]),
            ..Default::default()
        });

        assert_eq!(movie.id, before.id);
        assert_eq!(movie.year, 2000);
        assert_eq!(movie.genre, vec![Genre::Drama]);
        assert_eq!(movie.title, before.title);
        assert_eq!(movie.rate, before.rate);
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut movie = sample();
        let before = movie.clone();
        let patch = MoviePatch::default();
        assert!(patch.is_empty());
        movie.apply(patch);
        assert_eq!(movie, before);
    }

    #[test]
    fn test_patch_field_names() {
        let patch = MoviePatch {
            title: Some("x".into()),
            rate: Some(1.0),
            ..Default::default()
        };
        assert_eq!(patch.field_names(), vec!["title", "rate"]);
    }
}
