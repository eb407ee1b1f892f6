//! Trending search counter
//!
//! Every successful, non-empty search bumps a per-term counter in the document
//! store. The counter is read-then-written with no transaction: two writers
//! racing on the same term can lose an increment. That is accepted for a
//! low-traffic popularity list.
//!
//! Store failures never reach the caller. They are logged and the operation
//! degrades to a no-op (writes) or an empty list (reads).

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::config::image_url;
use crate::error::{MoviesError, Result};
use crate::store::{Document, DocumentStore, Query};
use crate::types::{MovieSummary, TrendingEntry};

/// Number of entries shown in the trending list
pub const TRENDING_LIMIT: u32 = 5;

const SEARCH_TERM: &str = "searchTerm";
const COUNT: &str = "count";

/// What an increment did to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterUpdate {
    Created,
    Incremented { count: u64 },
}

/// Trending counter over an injected document store
pub struct TrendingCounter {
    store: Arc<dyn DocumentStore>,
    image_base_url: String,
}

impl TrendingCounter {
    /// # Arguments
    /// * `store` - Collection holding one document per search term
    /// * `image_base_url` - Prefix for the poster/backdrop URLs written on create
    pub fn new(store: Arc<dyn DocumentStore>, image_base_url: impl Into<String>) -> Self {
        Self {
            store,
            image_base_url: image_base_url.into(),
        }
    }

    /// Count one more successful search for `search_term`.
    ///
    /// Creates the entry with `count = 1` and a snapshot of `movie` the first
    /// time a term is seen; afterwards only the count changes. Failures are
    /// logged and dropped.
    pub async fn increment_or_create(&self, search_term: &str, movie: &MovieSummary) {
        if search_term.is_empty() {
            tracing::debug!("ignoring trending update for empty search term");
            return;
        }

        match self.try_increment_or_create(search_term, movie).await {
            Ok(CounterUpdate::Created) => {
                tracing::debug!(term = %search_term, movie_id = movie.id, "trending entry created");
            }
            Ok(CounterUpdate::Incremented { count }) => {
                tracing::debug!(term = %search_term, count, "trending entry incremented");
            }
            Err(e) => {
                tracing::error!(term = %search_term, error = %e, "error updating search count");
            }
        }
    }

    /// Fallible core of [`increment_or_create`](Self::increment_or_create).
    pub async fn try_increment_or_create(
        &self,
        search_term: &str,
        movie: &MovieSummary,
    ) -> Result<CounterUpdate> {
        let existing = self
            .store
            .list_documents(&[Query::equal(SEARCH_TERM, search_term)])
            .await?;

        match existing.first() {
            Some(doc) => {
                let count = read_count(doc)? + 1;
                let mut data = Map::new();
                data.insert(COUNT.to_string(), json!(count));
                self.store.update_document(&doc.id, data).await?;
                Ok(CounterUpdate::Incremented { count })
            }
            None => {
                self.store
                    .create_document(self.snapshot(search_term, movie))
                    .await?;
                Ok(CounterUpdate::Created)
            }
        }
    }

    /// Up to `n` entries, highest count first.
    ///
    /// Ties keep the store's order. Any failure yields an empty list.
    pub async fn list_top(&self, n: u32) -> Vec<TrendingEntry> {
        let docs = match self
            .store
            .list_documents(&[Query::limit(n), Query::order_desc(COUNT)])
            .await
        {
            Ok(docs) => docs,
            Err(e) => {
                tracing::error!(error = %e, "error fetching trending movies");
                return Vec::new();
            }
        };

        let mut entries: Vec<TrendingEntry> = docs
            .iter()
            .filter_map(|doc| match entry_from_document(doc) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(id = %doc.id, error = %e, "skipping malformed trending entry");
                    None
                }
            })
            .collect();

        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(n as usize);
        entries
    }

    /// Document fields for a newly seen search term
    fn snapshot(&self, search_term: &str, movie: &MovieSummary) -> Map<String, Value> {
        let url = |path: &Option<String>| path.as_deref().map(|p| image_url(&self.image_base_url, p));

        let mut data = Map::new();
        data.insert(SEARCH_TERM.to_string(), json!(search_term));
        data.insert(COUNT.to_string(), json!(1));
        data.insert("movie_id".to_string(), json!(movie.id));
        data.insert("title".to_string(), json!(movie.title));
        data.insert("poster_url".to_string(), json!(url(&movie.poster_path)));
        data.insert("backdrop_url".to_string(), json!(url(&movie.backdrop_path)));
        data.insert("original_language".to_string(), json!(movie.original_language));
        data.insert("overview".to_string(), json!(movie.overview));
        data.insert("release_date".to_string(), json!(movie.release_date));
        data.insert("vote_average".to_string(), json!(floor_vote(movie.vote_average)));
        data.insert("vote_count".to_string(), json!(movie.vote_count));
        data.insert("genre_ids".to_string(), json!(movie.genre_ids));
        data
    }
}

/// Vote average stored as an integer; missing votes count as 0
pub fn floor_vote(vote_average: Option<f64>) -> i64 {
    vote_average
        .filter(|v| v.is_finite())
        .map(|v| v.floor() as i64)
        .unwrap_or(0)
}

fn read_count(doc: &Document) -> Result<u64> {
    doc.get(COUNT)
        .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0) as u64)))
        .ok_or_else(|| MoviesError::Store(format!("document {} has no numeric count", doc.id)))
}

fn entry_from_document(doc: &Document) -> Result<TrendingEntry> {
    let text = |key: &str| doc.get(key).and_then(Value::as_str).map(str::to_string);
    let number = |key: &str| doc.get(key).and_then(Value::as_u64).unwrap_or_default();

    let search_term = text(SEARCH_TERM)
        .ok_or_else(|| MoviesError::Store(format!("document {} has no searchTerm", doc.id)))?;

    Ok(TrendingEntry {
        id: doc.id.clone(),
        search_term,
        count: read_count(doc)?,
        movie_id: number("movie_id"),
        title: text("title").unwrap_or_default(),
        poster_url: text("poster_url"),
        backdrop_url: text("backdrop_url"),
        original_language: text("original_language").unwrap_or_default(),
        overview: text("overview"),
        release_date: text("release_date"),
        vote_average: doc
            .get("vote_average")
            .and_then(Value::as_i64)
            .unwrap_or_default(),
        vote_count: number("vote_count"),
        genre_ids: doc
            .get("genre_ids")
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| id.as_u64().map(|id| id as u32))
                    .collect()
            })
            .unwrap_or_default(),
    })
}
