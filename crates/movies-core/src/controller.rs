//! Movie query controller
//!
//! Owns the pagination state, picks discovery or search mode for each fetch
//! and folds transport and API failures into a single user-visible message.
//!
//! Fetches may overlap (a new search landing while a page flip is pending).
//! Each fetch takes a sequence number when it is issued; a response whose
//! number is no longer the latest is dropped without touching state or the
//! trending counter.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::catalog::MovieSource;
use crate::error::{MoviesError, Result};
use crate::trending::TrendingCounter;
use crate::types::{QueryMode, ResultPage};

/// What the result grid should show
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultsState {
    /// Nothing fetched yet
    Idle,
    /// The latest fetch has not completed
    Loading,
    /// The latest fetch succeeded; `page.items` may be empty
    Loaded { page: ResultPage },
    /// The latest fetch failed; results are cleared
    Failed { message: String },
}

/// Serializable view of the controller for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerSnapshot {
    pub committed_term: String,
    pub page: u32,
    /// Known after the first successful fetch
    pub total_pages: Option<u32>,
    pub loading: bool,
    pub results: ResultsState,
    pub can_prev: bool,
    pub can_next: bool,
}

#[derive(Debug)]
struct ControllerState {
    committed_term: String,
    page: u32,
    total_pages: Option<u32>,
    results: ResultsState,
    latest_seq: u64,
    completed_seq: u64,
}

impl ControllerState {
    fn in_flight(&self) -> bool {
        self.latest_seq != self.completed_seq
    }

    fn can_next(&self) -> bool {
        !self.in_flight() && self.total_pages.is_some_and(|total| self.page < total)
    }

    fn can_prev(&self) -> bool {
        !self.in_flight() && self.total_pages.is_some() && self.page > 1
    }

    /// Register a new fetch and return its sequence number
    fn begin(&mut self, page: u32) -> u64 {
        self.latest_seq += 1;
        self.page = page;
        self.results = ResultsState::Loading;
        self.latest_seq
    }
}

/// Query controller over an injected movie source and trending counter
pub struct QueryController {
    source: Arc<dyn MovieSource>,
    trending: Arc<TrendingCounter>,
    state: Mutex<ControllerState>,
}

impl QueryController {
    pub fn new(source: Arc<dyn MovieSource>, trending: Arc<TrendingCounter>) -> Self {
        Self {
            source,
            trending,
            state: Mutex::new(ControllerState {
                committed_term: String::new(),
                page: 1,
                total_pages: None,
                results: ResultsState::Idle,
                latest_seq: 0,
                completed_seq: 0,
            }),
        }
    }

    /// Fetch one page for `query`: discovery when empty, search otherwise.
    ///
    /// There is no upper bound check on `page`; the API decides what lies
    /// beyond the last page.
    ///
    /// # Returns
    /// * `Ok(ResultPage)` if this fetch succeeded and was applied
    /// * `Err(MoviesError::InvalidPage)` if `page` is 0
    /// * `Err(MoviesError::Superseded)` if a newer fetch was issued meanwhile
    /// * any transport, status, parse or API error otherwise
    pub async fn fetch_page(&self, query: &str, page: u32) -> Result<ResultPage> {
        if page == 0 {
            return Err(MoviesError::InvalidPage(page));
        }

        let seq = self.state.lock().await.begin(page);
        self.run(QueryMode::from_query(query), page, seq).await
    }

    /// Make `term` the committed query and load its first page.
    pub async fn commit_query(&self, term: impl Into<String>) -> Result<ResultPage> {
        let term = term.into();
        let seq = {
            let mut state = self.state.lock().await;
            state.committed_term = term.clone();
            state.begin(1)
        };
        self.run(QueryMode::from_query(&term), 1, seq).await
    }

    /// Load the following page of the committed query.
    ///
    /// Returns `None` without issuing a request while a fetch is in flight,
    /// before anything has loaded, or on the last page.
    pub async fn next_page(&self) -> Option<Result<ResultPage>> {
        self.step(1).await
    }

    /// Load the preceding page of the committed query.
    ///
    /// Returns `None` without issuing a request while a fetch is in flight,
    /// before anything has loaded, or on page 1.
    pub async fn prev_page(&self) -> Option<Result<ResultPage>> {
        self.step(-1).await
    }

    pub async fn snapshot(&self) -> ControllerSnapshot {
        let state = self.state.lock().await;
        ControllerSnapshot {
            committed_term: state.committed_term.clone(),
            page: state.page,
            total_pages: state.total_pages,
            loading: state.in_flight(),
            results: state.results.clone(),
            can_prev: state.can_prev(),
            can_next: state.can_next(),
        }
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.in_flight()
    }

    async fn step(&self, delta: i8) -> Option<Result<ResultPage>> {
        let (term, page, seq) = {
            let mut state = self.state.lock().await;
            let allowed = if delta > 0 {
                state.can_next()
            } else {
                state.can_prev()
            };
            if !allowed {
                tracing::debug!(page = state.page, delta, "pagination ignored");
                return None;
            }

            let page = if delta > 0 {
                state.page + 1
            } else {
                state.page - 1
            };
            (state.committed_term.clone(), page, state.begin(page))
        };

        Some(self.run(QueryMode::from_query(&term), page, seq).await)
    }

    async fn run(&self, mode: QueryMode, page: u32, seq: u64) -> Result<ResultPage> {
        tracing::debug!(seq, ?mode, page, "fetching movies");
        let outcome = self.source.fetch_page(&mode, page).await;

        let mut state = self.state.lock().await;
        if seq != state.latest_seq {
            tracing::debug!(seq, latest = state.latest_seq, "discarding stale response");
            return Err(MoviesError::Superseded);
        }
        state.completed_seq = seq;

        match outcome {
            Ok(result) => {
                state.page = result.page.max(1);
                state.total_pages = Some(result.total_pages);
                state.results = ResultsState::Loaded {
                    page: result.clone(),
                };
                drop(state);

                if let (Some(term), Some(first)) = (mode.search_term(), result.first()) {
                    self.trending.increment_or_create(term, first).await;
                }
                Ok(result)
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching movies");
                state.results = ResultsState::Failed {
                    message: e.user_message(),
                };
                Err(e)
            }
        }
    }
}
