//! HTTP client for the TMDB API
//!
//! Thin wrapper over `reqwest` that attaches the bearer credential to every
//! request and maps non-success statuses to errors. Failed requests are never
//! retried; the caller decides what a failure means.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

use crate::config::ApiConfig;
use crate::error::{MoviesError, Result};

/// HTTP client for the movie metadata API
pub struct TmdbClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Base URL without trailing slash
    base_url: String,
}

impl TmdbClient {
    /// Create a new client from API configuration
    ///
    /// # Errors
    /// - `MoviesError::InvalidHeader` if the token cannot be sent as a header
    /// - `MoviesError::HttpError` if the HTTP client cannot be created
    pub fn with_config(config: &ApiConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.bearer_token))
            .map_err(|_| MoviesError::InvalidHeader("bearer token".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a response body from an API path
    ///
    /// # Arguments
    /// * `path` - Path relative to the base URL (e.g., "/movie/550/videos")
    ///
    /// # Errors
    /// - `MoviesError::HttpError` - Network failure
    /// - `MoviesError::Status` - Server returned a non-2xx status
    pub async fn fetch(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "request rejected");
            return Err(MoviesError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
