//! Video list parser for `/movie/{id}/videos`

use serde::Deserialize;

use super::parse_checked;
use crate::error::{MoviesError, Result};
use crate::types::Video;

#[derive(Debug, Deserialize)]
struct RawVideos {
    #[serde(default)]
    results: Vec<RawVideo>,
}

#[derive(Debug, Deserialize)]
struct RawVideo {
    key: Option<String>,
    site: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    name: Option<String>,
}

/// Parse a videos response body, keeping API order.
///
/// Entries without a playable key are skipped.
pub fn parse_videos(body: &str) -> Result<Vec<Video>> {
    let value = parse_checked(body)?;
    let raw: RawVideos = serde_json::from_value(value)
        .map_err(|e| MoviesError::ParseError(format!("video list: {}", e)))?;

    Ok(raw
        .results
        .into_iter()
        .filter_map(|v| {
            let key = v.key.filter(|k| !k.is_empty())?;
            Some(Video {
                key,
                site: v.site,
                kind: v.kind,
                name: v.name,
            })
        })
        .collect())
}
