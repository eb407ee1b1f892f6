//! Static genre lookup
//!
//! Search and discovery results only carry genre IDs. They are resolved to
//! display names locally instead of calling the genre endpoint.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Name used for genre IDs missing from the table
pub const UNKNOWN_GENRE: &str = "Unknown";

/// TMDB movie genres as of API v3
const TMDB_MOVIE_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// Immutable genre ID → name table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreTable {
    names: HashMap<u32, String>,
}

impl GenreTable {
    /// Build a table from arbitrary `(id, name)` pairs
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        Self {
            names: entries
                .into_iter()
                .map(|(id, name)| (id, name.into()))
                .collect(),
        }
    }

    /// The TMDB movie genre list
    pub fn tmdb() -> Self {
        Self::new(TMDB_MOVIE_GENRES.iter().copied())
    }

    /// Name for a single genre ID, `"Unknown"` if not in the table
    pub fn name(&self, id: u32) -> &str {
        self.names.get(&id).map(String::as_str).unwrap_or(UNKNOWN_GENRE)
    }

    /// Resolve a list of IDs, preserving order and length
    pub fn resolve(&self, ids: &[u32]) -> Vec<String> {
        ids.iter().map(|id| self.name(*id).to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for GenreTable {
    fn default() -> Self {
        Self::tmdb()
    }
}
