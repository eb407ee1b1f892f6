//! Data types for the movie finder
//!
//! This module contains all the core data structures used throughout the library.
//! All types implement Serialize and Deserialize for JSON compatibility with Tauri.

use serde::{Deserialize, Serialize};

/// Which listing endpoint a query maps to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryMode {
    /// Popular titles, sorted by descending popularity
    Discover,
    /// Titles matching a search term
    Search(String),
}

impl QueryMode {
    /// Select the mode purely from whether the query is empty.
    ///
    /// The term is kept exactly as typed; no trimming or case folding.
    pub fn from_query(query: &str) -> Self {
        if query.is_empty() {
            QueryMode::Discover
        } else {
            QueryMode::Search(query.to_string())
        }
    }

    /// Relative API path for the given page, query term URL-encoded
    pub fn path(&self, page: u32) -> String {
        match self {
            QueryMode::Discover => {
                format!("/discover/movie?sort_by=popularity.desc&page={}", page)
            }
            QueryMode::Search(term) => {
                format!("/search/movie?query={}&page={}", urlencoding::encode(term), page)
            }
        }
    }

    pub fn search_term(&self) -> Option<&str> {
        match self {
            QueryMode::Discover => None,
            QueryMode::Search(term) => Some(term),
        }
    }
}

/// A movie as it appears in discovery and search listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie identifier
    pub id: u64,
    pub title: String,
    /// Relative poster path (e.g. `/abc.jpg`)
    pub poster_path: Option<String>,
    /// Relative backdrop path
    pub backdrop_path: Option<String>,
    /// Release date as `YYYY-MM-DD`
    pub release_date: Option<String>,
    /// Average rating on a 0-10 scale
    pub vote_average: Option<f64>,
    pub vote_count: u64,
    /// ISO 639-1 language code
    pub original_language: String,
    pub genre_ids: Vec<u32>,
    pub overview: Option<String>,
}

impl MovieSummary {
    /// Release year taken from the date prefix
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
    }
}

/// One page of listing results, replaced wholesale on every fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Items on the current page, in API rank order
    pub items: Vec<MovieSummary>,
    /// Current page number (1-based)
    pub page: u32,
    /// Total number of pages reported by the API
    pub total_pages: u32,
}

impl ResultPage {
    pub fn new(items: Vec<MovieSummary>, page: u32, total_pages: u32) -> Self {
        Self {
            items,
            page,
            total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Highest-ranked item, used as the representative for trending searches
    pub fn first(&self) -> Option<&MovieSummary> {
        self.items.first()
    }
}

/// A video attached to a movie (trailer, teaser, clip...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Site-specific playable key
    pub key: String,
    pub site: Option<String>,
    /// Video type as reported by TMDB (e.g. "Trailer")
    pub kind: Option<String>,
    pub name: Option<String>,
}

/// A persisted counter for one search term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    /// Store-assigned document ID
    pub id: String,
    /// Exact search term, the unique key
    pub search_term: String,
    /// Number of successful searches for this term
    pub count: u64,
    /// TMDB ID of the representative movie
    pub movie_id: u64,
    pub title: String,
    /// Fully qualified poster URL
    pub poster_url: Option<String>,
    /// Fully qualified backdrop URL
    pub backdrop_url: Option<String>,
    pub original_language: String,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    /// Vote average floored to an integer
    pub vote_average: i64,
    pub vote_count: u64,
    pub genre_ids: Vec<u32>,
}
