//! Movie details view and trailer lookup

use serde::{Deserialize, Serialize};

use crate::catalog::MovieSource;
use crate::config::image_url;
use crate::genres::GenreTable;
use crate::types::MovieSummary;

pub const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";
pub const NO_POSTER: &str = "/no-poster.png";
pub const NO_VIDEO: &str = "/n-vid.png";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_OVERVIEW: &str = "No overview available for this movie";

/// Embed URL of the first video attached to a movie.
///
/// The first entry is taken regardless of its type or site. A movie without
/// videos, or any failure along the way, yields `None`; failures are logged.
pub async fn trailer(source: &dyn MovieSource, movie_id: u64) -> Option<String> {
    match source.videos(movie_id).await {
        Ok(videos) => match videos.first() {
            Some(video) => Some(format!("{}{}", YOUTUBE_EMBED_BASE, video.key)),
            None => {
                tracing::debug!(movie_id, "no videos for movie");
                None
            }
        },
        Err(e) => {
            tracing::warn!(movie_id, error = %e, "error fetching trailer");
            None
        }
    }
}

/// Rating with one decimal; a missing or zero average shows as `N/A`
pub fn display_rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(v) if v != 0.0 && v.is_finite() => format!("{:.1}", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Everything the details dialog shows for one movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub genres: Vec<String>,
    pub poster_url: String,
    /// Embeddable trailer, when one exists
    pub trailer_url: Option<String>,
    /// Still shown in place of a missing trailer
    pub fallback_image: String,
    pub rating: String,
    pub vote_count: u64,
    pub year: String,
    pub release_date: String,
    pub language: String,
    pub overview: String,
}

impl MovieDetails {
    /// Build the details view from a listing entry.
    ///
    /// # Arguments
    /// * `movie` - Listing entry the user opened
    /// * `genres` - Table used to name `movie.genre_ids`
    /// * `image_base_url` - Prefix for poster and backdrop paths
    /// * `trailer_url` - Result of [`trailer`], if it was looked up
    pub fn resolve(
        movie: &MovieSummary,
        genres: &GenreTable,
        image_base_url: &str,
        trailer_url: Option<String>,
    ) -> Self {
        let not_available = || NOT_AVAILABLE.to_string();

        Self {
            id: movie.id,
            title: movie.title.clone(),
            genres: genres.resolve(&movie.genre_ids),
            poster_url: movie
                .poster_path
                .as_deref()
                .map(|p| image_url(image_base_url, p))
                .unwrap_or_else(|| NO_POSTER.to_string()),
            trailer_url,
            fallback_image: movie
                .backdrop_path
                .as_deref()
                .map(|p| image_url(image_base_url, p))
                .unwrap_or_else(|| NO_VIDEO.to_string()),
            rating: display_rating(movie.vote_average),
            vote_count: movie.vote_count,
            year: movie
                .release_year()
                .map(str::to_string)
                .unwrap_or_else(not_available),
            release_date: movie.release_date.clone().unwrap_or_else(not_available),
            language: if movie.original_language.is_empty() {
                not_available()
            } else {
                movie.original_language.to_uppercase()
            },
            overview: movie
                .overview
                .clone()
                .unwrap_or_else(|| NO_OVERVIEW.to_string()),
        }
    }

    /// Look up the trailer and build the details view in one step.
    pub async fn load(
        source: &dyn MovieSource,
        movie: &MovieSummary,
        genres: &GenreTable,
        image_base_url: &str,
    ) -> Self {
        let trailer_url = trailer(source, movie.id).await;
        Self::resolve(movie, genres, image_base_url, trailer_url)
    }
}
