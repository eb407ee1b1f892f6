//! Movie catalog API
//!
//! This module combines the HTTP client with the response parsers to provide
//! listing and video lookups. The [`MovieSource`] trait is the seam the query
//! controller and the details lookup depend on.

use async_trait::async_trait;

use crate::client::TmdbClient;
use crate::config::ApiConfig;
use crate::error::{MoviesError, Result};
use crate::parser::{parse_result_page, parse_videos};
use crate::types::{QueryMode, ResultPage, Video};

/// Anything that can serve listing pages and video lists
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Fetch one listing page for the given mode.
    async fn fetch_page(&self, mode: &QueryMode, page: u32) -> Result<ResultPage>;

    /// Fetch all videos attached to a movie, in API order.
    async fn videos(&self, movie_id: u64) -> Result<Vec<Video>>;
}

/// TMDB-backed movie catalog
///
/// # Example
/// ```no_run
/// use movies_core::{ApiConfig, MovieCatalog};
///
/// # async fn example() -> Result<(), movies_core::MoviesError> {
/// let catalog = MovieCatalog::new(&ApiConfig::new("token"))?;
/// let popular = catalog.discover(1).await?;
/// println!("{} of {} pages", popular.page, popular.total_pages);
/// # Ok(())
/// # }
/// ```
pub struct MovieCatalog {
    client: TmdbClient,
}

impl MovieCatalog {
    /// Create a catalog with its own HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: TmdbClient::with_config(config)?,
        })
    }

    /// Create a catalog with a pre-configured client.
    pub fn with_client(client: TmdbClient) -> Self {
        Self { client }
    }

    /// Popular movies, sorted by descending popularity.
    pub async fn discover(&self, page: u32) -> Result<ResultPage> {
        self.listing(&QueryMode::Discover, page).await
    }

    /// Movies matching `query`. An empty query falls back to discovery.
    pub async fn search(&self, query: &str, page: u32) -> Result<ResultPage> {
        self.listing(&QueryMode::from_query(query), page).await
    }

    async fn listing(&self, mode: &QueryMode, page: u32) -> Result<ResultPage> {
        if page == 0 {
            return Err(MoviesError::InvalidPage(page));
        }

        let body = self.client.fetch(&mode.path(page)).await?;
        parse_result_page(&body)
    }
}

#[async_trait]
impl MovieSource for MovieCatalog {
    async fn fetch_page(&self, mode: &QueryMode, page: u32) -> Result<ResultPage> {
        self.listing(mode, page).await
    }

    async fn videos(&self, movie_id: u64) -> Result<Vec<Video>> {
        if movie_id == 0 {
            return Err(MoviesError::InvalidId(movie_id));
        }

        let body = self.client.fetch(&format!("/movie/{}/videos", movie_id)).await?;
        parse_videos(&body)
    }
}
