//! Movie Finder Core Library
//!
//! This crate provides the movie discovery logic behind the desktop app:
//! popular and searched listings from TMDB, pagination, a debounced search
//! box and a persisted "trending searches" counter.
//!
//! # Features
//! - Discover popular movies or search by title, one page at a time
//! - Debounced search input (500 ms of quiet before a term is committed)
//! - Stale response detection when fetches overlap
//! - Trending search counter on Appwrite or in memory
//! - Movie details with genre names and the first trailer

pub mod catalog;
pub mod client;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod details;
pub mod error;
pub mod genres;
pub mod parser;
pub mod store;
pub mod trending;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use catalog::{MovieCatalog, MovieSource};
pub use client::TmdbClient;
pub use config::{ApiConfig, ConfigError, MoviesConfig, StoreConfig};
pub use controller::{ControllerSnapshot, QueryController, ResultsState};
pub use debounce::{SearchDebouncer, SearchInput, SEARCH_DEBOUNCE};
pub use details::{trailer, MovieDetails};
pub use error::{MoviesError, Result};
pub use genres::GenreTable;
pub use store::{AppwriteStore, DocumentStore, MemoryStore};
pub use trending::{TrendingCounter, TRENDING_LIMIT};
pub use types::{MovieSummary, QueryMode, ResultPage, TrendingEntry, Video};
