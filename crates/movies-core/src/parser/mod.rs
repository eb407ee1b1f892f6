//! Response parsers for the movie metadata API
//!
//! Every response body goes through an explicit parse step that checks the
//! API failure flag, validates required fields and produces typed values:
//! - `listing`: discover and search result pages
//! - `videos`: per-movie video lists

pub mod listing;
pub mod videos;

use serde_json::Value;

use crate::error::{MoviesError, Result};

// Re-export main parsing functions
pub use listing::parse_result_page;
pub use videos::parse_videos;

/// Parse a body into JSON and reject it if the API flagged a failure.
fn parse_checked(body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| MoviesError::ParseError(format!("invalid JSON: {}", e)))?;

    if let Some(message) = failure_message(&value) {
        return Err(MoviesError::Api(message));
    }

    Ok(value)
}

/// Extract the failure message if the payload carries an explicit failure flag.
///
/// Two shapes are recognised:
/// - `{"Response": "False", "Error": "..."}`
/// - `{"success": false, "status_message": "..."}` (TMDB)
///
/// A flagged payload without a message yields an empty string.
pub fn failure_message(value: &Value) -> Option<String> {
    let text = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let response_flag = match value.get("Response") {
        Some(Value::String(s)) => s.eq_ignore_ascii_case("false"),
        Some(Value::Bool(b)) => !b,
        _ => false,
    };
    if response_flag {
        return Some(text("Error"));
    }

    if value.get("success") == Some(&Value::Bool(false)) {
        return Some(text("status_message"));
    }

    None
}
