//! Runtime configuration
//!
//! All settings are read once at start-up into an immutable [`MoviesConfig`]
//! that is handed to the clients that need it.

use std::env;

use thiserror::Error;

use crate::genres::GenreTable;

const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const DEFAULT_STORE_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for the movie metadata API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without trailing slash (default: TMDB v3)
    pub base_url: String,
    /// Bearer token sent with every request
    pub bearer_token: String,
    /// Prefix used to turn poster/backdrop paths into URLs
    pub image_base_url: String,
    /// Optional request timeout; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            bearer_token: bearer_token.into(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }

    /// Fully qualified image URL for a TMDB path like `/abc.jpg`
    pub fn image_url(&self, path: &str) -> String {
        image_url(&self.image_base_url, path)
    }
}

/// Join an image base URL and a relative path with exactly one slash
pub fn image_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Settings for the hosted document store holding trending searches
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    /// Server API key; browser-style sessions work without one
    pub api_key: Option<String>,
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct MoviesConfig {
    pub api: ApiConfig,
    /// `None` keeps trending searches in memory for the session
    pub store: Option<StoreConfig>,
    pub genres: GenreTable,
}

impl MoviesConfig {
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            store: None,
            genres: GenreTable::tmdb(),
        }
    }

    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = Some(store);
        self
    }

    /// Build configuration from environment variables, loading a `.env` file
    /// first when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bearer_token = get("TMDB_API_KEY").ok_or(ConfigError::Missing("TMDB_API_KEY"))?;

        let timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!("REQUEST_TIMEOUT_SECS must be a number, got {raw:?}"))
            })?),
            None => None,
        };

        let api = ApiConfig {
            base_url: get("TMDB_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            bearer_token,
            image_base_url: get("TMDB_IMAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string()),
            timeout_secs,
        };

        let project_id = get("APPWRITE_PROJECT_ID");
        let database_id = get("APPWRITE_DATABASE_ID");
        let collection_id = get("APPWRITE_COLLECTION_ID");

        let store = match (project_id, database_id, collection_id) {
            (None, None, None) => None,
            (Some(project_id), Some(database_id), Some(collection_id)) => Some(StoreConfig {
                endpoint: get("APPWRITE_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_STORE_ENDPOINT.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                project_id,
                database_id,
                collection_id,
                api_key: get("APPWRITE_API_KEY"),
            }),
            (None, _, _) => return Err(ConfigError::Missing("APPWRITE_PROJECT_ID")),
            (_, None, _) => return Err(ConfigError::Missing("APPWRITE_DATABASE_ID")),
            (_, _, None) => return Err(ConfigError::Missing("APPWRITE_COLLECTION_ID")),
        };

        Ok(Self {
            api,
            store,
            genres: GenreTable::tmdb(),
        })
    }
}
