//! Error types for the movie finder core
//!
//! This module defines all error types used throughout the library.
//! MoviesError implements Serialize for Tauri compatibility.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Message shown to the user for any transport-level failure
pub const GENERIC_FETCH_ERROR: &str = "An error occurred fetching movies. Please try again later.";

/// Message shown when the API reports failure without a message of its own
pub const GENERIC_API_ERROR: &str = "Failed to fetch movies.";

/// Error type for movie finder operations
#[derive(Error, Debug)]
pub enum MoviesError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status code
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The API answered but flagged the request as failed
    #[error("{0}")]
    Api(String),

    /// Response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Page numbers start at 1
    #[error("Invalid page: {0}")]
    InvalidPage(u32),

    /// Credential cannot be sent as an HTTP header
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// Invalid TMDB movie ID provided
    #[error("Invalid movie ID: {0}")]
    InvalidId(u64),

    /// Document store request failed
    #[error("Document store error: {0}")]
    Store(String),

    /// A newer fetch was issued before this one completed
    #[error("Response superseded by a newer request")]
    Superseded,
}

impl MoviesError {
    /// The message a user sees when a fetch fails with this error.
    ///
    /// API-reported failures are surfaced verbatim; everything else collapses
    /// into the generic transport message.
    pub fn user_message(&self) -> String {
        match self {
            MoviesError::Api(message) if !message.trim().is_empty() => message.clone(),
            MoviesError::Api(_) => GENERIC_API_ERROR.to_string(),
            _ => GENERIC_FETCH_ERROR.to_string(),
        }
    }

    /// Whether this error came from the API reporting a logical failure
    pub fn is_logical(&self) -> bool {
        matches!(self, MoviesError::Api(_))
    }
}

/// Serialize MoviesError as a string for Tauri compatibility
impl Serialize for MoviesError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for movie finder operations
pub type Result<T> = std::result::Result<T, MoviesError>;
