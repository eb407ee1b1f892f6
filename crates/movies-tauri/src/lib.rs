//! Movie Finder Tauri Integration
//!
//! This crate exposes the movie finder core to a Tauri 2.0 frontend.
//!
//! # Usage
//!
//! ```rust,ignore
//! use movies_core::MoviesConfig;
//! use movies_tauri::AppState;
//! use tauri::Manager;
//!
//! fn main() {
//!     movies_tauri::init_tracing();
//!
//!     tauri::Builder::default()
//!         .setup(|app| {
//!             let config = MoviesConfig::from_env()?;
//!             let state = tauri::async_runtime::block_on(AppState::start(config))?;
//!             app.manage(state);
//!             Ok(())
//!         })
//!         .invoke_handler(tauri::generate_handler![
//!             movies_tauri::commands::set_search_term,
//!             movies_tauri::commands::fetch_page,
//!             movies_tauri::commands::next_page,
//!             movies_tauri::commands::prev_page,
//!             movies_tauri::commands::results,
//!             movies_tauri::commands::trending_movies,
//!             movies_tauri::commands::movie_details,
//!         ])
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! # Commands
//! - `set_search_term` - Feed a raw keystroke-level term to the debouncer
//! - `fetch_page` - Fetch a page for an explicit query
//! - `next_page` / `prev_page` - Step through pages of the committed query
//! - `results` - Current results, pagination and loading state
//! - `trending_movies` - Trending searches loaded at start-up
//! - `movie_details` - Details view with trailer for one movie

pub mod commands;

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use movies_core::{
    AppwriteStore, DocumentStore, GenreTable, MemoryStore, MovieCatalog, MovieSource,
    MoviesConfig, QueryController, SearchDebouncer, SearchInput, TrendingCounter, TrendingEntry,
    TRENDING_LIMIT,
};

const DEFAULT_LOG_FILTER: &str = "info,movies_core=debug";

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `info,movies_core=debug`.
/// Calling this more than once only logs a warning.
pub fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

/// Application state managed by Tauri.
///
/// Holds the query controller, the writer half of the search debouncer and
/// the trending list loaded once at start-up.
pub struct AppState {
    controller: Arc<QueryController>,
    input: SearchInput,
    source: Arc<dyn MovieSource>,
    genres: GenreTable,
    image_base_url: String,
    trending: Vec<TrendingEntry>,
}

impl AppState {
    /// Build the state from configuration.
    ///
    /// Uses the Appwrite store when one is configured and an in-memory store
    /// otherwise. Must run inside the Tauri async runtime.
    ///
    /// # Errors
    /// Returns an error string if an HTTP client cannot be created.
    pub async fn start(config: MoviesConfig) -> Result<Self, String> {
        let source: Arc<dyn MovieSource> =
            Arc::new(MovieCatalog::new(&config.api).map_err(|e| e.to_string())?);

        let store: Arc<dyn DocumentStore> = match &config.store {
            Some(store_config) => {
                tracing::info!(endpoint = %store_config.endpoint, "using Appwrite trending store");
                Arc::new(AppwriteStore::new(store_config).map_err(|e| e.to_string())?)
            }
            None => {
                tracing::info!("no Appwrite project configured, trending searches kept in memory");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::with_parts(source, store, config).await)
    }

    /// Build the state around an existing movie source and document store.
    pub async fn with_parts(
        source: Arc<dyn MovieSource>,
        store: Arc<dyn DocumentStore>,
        config: MoviesConfig,
    ) -> Self {
        let counter = Arc::new(TrendingCounter::new(
            store,
            config.api.image_base_url.clone(),
        ));
        let controller = Arc::new(QueryController::new(source.clone(), counter.clone()));

        let (input, debouncer) = SearchDebouncer::new();
        spawn_commits(controller.clone(), debouncer);

        let trending = counter.list_top(TRENDING_LIMIT).await;
        tracing::debug!(entries = trending.len(), "trending searches loaded");

        Self {
            controller,
            input,
            source,
            genres: config.genres,
            image_base_url: config.api.image_base_url,
            trending,
        }
    }

    pub fn controller(&self) -> &Arc<QueryController> {
        &self.controller
    }

    pub fn input(&self) -> &SearchInput {
        &self.input
    }

    pub fn source(&self) -> &dyn MovieSource {
        self.source.as_ref()
    }

    pub fn genres(&self) -> &GenreTable {
        &self.genres
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    pub fn trending(&self) -> &[TrendingEntry] {
        &self.trending
    }
}

/// Commit every debounced term to the controller.
///
/// Each commit runs as its own task so a slow fetch never holds back the
/// next commit; the controller discards whichever response goes stale.
fn spawn_commits(controller: Arc<QueryController>, debouncer: SearchDebouncer) {
    tauri::async_runtime::spawn(debouncer.run(move |term| {
        let controller = controller.clone();
        tauri::async_runtime::spawn(async move {
            // failures are already recorded in the controller state
            let _ = controller.commit_query(term).await;
        });
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use movies_core::{ApiConfig, QueryMode, ResultPage, Video, SEARCH_DEBOUNCE};

    /// Source that records every listing request and answers with an empty page
    #[derive(Default)]
    struct CountingSource {
        calls: Mutex<Vec<QueryMode>>,
    }

    impl CountingSource {
        fn calls(&self) -> Vec<QueryMode> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MovieSource for CountingSource {
        async fn fetch_page(&self, mode: &QueryMode, page: u32) -> movies_core::Result<ResultPage> {
            self.calls.lock().unwrap().push(mode.clone());
            Ok(ResultPage::new(Vec::new(), page, 1))
        }

        async fn videos(&self, _movie_id: u64) -> movies_core::Result<Vec<Video>> {
            Ok(Vec::new())
        }
    }

    async fn wait_for_calls(source: &CountingSource, n: usize) {
        for _ in 0..100 {
            if source.calls().len() >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("expected {} fetches, saw {:?}", n, source.calls());
    }

    fn offline_config() -> MoviesConfig {
        MoviesConfig::new(ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..ApiConfig::new("token")
        })
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }

    #[tokio::test]
    async fn test_start_without_store_uses_memory() {
        let state = AppState::start(offline_config()).await.unwrap();
        assert!(state.trending().is_empty());
        assert_eq!(state.image_base_url(), "https://image.tmdb.org/t/p/w500");
        assert_eq!(state.genres().name(35), "Comedy");
    }

    #[tokio::test]
    async fn test_with_parts_loads_existing_trending() {
        let config = offline_config();
        let source: Arc<dyn MovieSource> = Arc::new(MovieCatalog::new(&config.api).unwrap());
        let store = Arc::new(MemoryStore::new());
        let mut data = serde_json::Map::new();
        data.insert("searchTerm".to_string(), serde_json::json!("alien"));
        data.insert("count".to_string(), serde_json::json!(3));
        store.create_document(data).await.unwrap();

        let state = AppState::with_parts(source, store, config).await;
        assert_eq!(state.trending().len(), 1);
        assert_eq!(state.trending()[0].search_term, "alien");
        assert_eq!(state.trending()[0].count, 3);
    }

    #[tokio::test]
    async fn test_debounced_commits_drive_fetches() {
        let source = Arc::new(CountingSource::default());
        let state = AppState::with_parts(
            source.clone(),
            Arc::new(MemoryStore::new()),
            offline_config(),
        )
        .await;

        wait_for_calls(&source, 1).await;
        assert_eq!(source.calls(), vec![QueryMode::Discover]);

        for term in ["b", "ba", "bat"] {
            state.input().set(term);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        wait_for_calls(&source, 2).await;

        // no further commit once the input has settled
        tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;
        assert_eq!(
            source.calls(),
            vec![QueryMode::Discover, QueryMode::Search("bat".to_string())]
        );

        let snapshot = state.controller().snapshot().await;
        assert_eq!(snapshot.committed_term, "bat");
        assert_eq!(snapshot.page, 1);
    }

    #[tokio::test]
    async fn test_search_input_is_shared() {
        let state = AppState::start(offline_config()).await.unwrap();
        state.input().set("bat");
        assert_eq!(state.input().current(), "bat");
    }
}
