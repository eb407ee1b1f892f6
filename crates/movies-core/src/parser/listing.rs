//! Result page parser for discover and search responses

use serde::Deserialize;

use super::parse_checked;
use crate::error::{MoviesError, Result};
use crate::types::{MovieSummary, ResultPage};

#[derive(Debug, Deserialize)]
struct RawPage {
    page: u32,
    total_pages: u32,
    results: Vec<RawMovie>,
}

#[derive(Debug, Deserialize)]
struct RawMovie {
    id: u64,
    title: Option<String>,
    original_title: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f64>,
    vote_count: Option<u64>,
    original_language: Option<String>,
    genre_ids: Option<Vec<u32>>,
    overview: Option<String>,
}

/// Drop empty strings, which TMDB uses for "unknown"
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<RawMovie> for MovieSummary {
    fn from(raw: RawMovie) -> Self {
        MovieSummary {
            id: raw.id,
            title: non_empty(raw.title)
                .or_else(|| non_empty(raw.original_title))
                .unwrap_or_default(),
            poster_path: non_empty(raw.poster_path),
            backdrop_path: non_empty(raw.backdrop_path),
            release_date: non_empty(raw.release_date),
            vote_average: raw.vote_average,
            vote_count: raw.vote_count.unwrap_or_default(),
            original_language: raw.original_language.unwrap_or_default(),
            genre_ids: raw.genre_ids.unwrap_or_default(),
            overview: non_empty(raw.overview),
        }
    }
}

/// Parse a discover/search response body into a [`ResultPage`].
///
/// # Returns
/// * `Ok(ResultPage)` with items in API order
/// * `Err(MoviesError::Api)` if the payload carries a failure flag
/// * `Err(MoviesError::ParseError)` if required fields are missing
pub fn parse_result_page(body: &str) -> Result<ResultPage> {
    let value = parse_checked(body)?;
    let raw: RawPage = serde_json::from_value(value)
        .map_err(|e| MoviesError::ParseError(format!("result page: {}", e)))?;

    let items = raw.results.into_iter().map(MovieSummary::from).collect();
    Ok(ResultPage::new(items, raw.page, raw.total_pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_result_page() {
        let body = json!({
            "page": 1,
            "total_pages": 10,
            "total_results": 200,
            "results": [{
                "id": 268,
                "title": "Batman",
                "poster_path": "/kBf3g9crrADGMc2AMAMlLBgSm2h.jpg",
                "backdrop_path": "/frDS8A5vIP927KYAxTVVKRIbqZw.jpg",
                "release_date": "1989-06-21",
                "vote_average": 7.23,
                "vote_count": 7700,
                "original_language": "en",
                "genre_ids": [14, 28],
                "overview": "Batman must face his most ruthless nemesis."
            }]
        })
        .to_string();

        let page = parse_result_page(&body).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 10);
        assert_eq!(page.items.len(), 1);
        let movie = &page.items[0];
        assert_eq!(movie.id, 268);
        assert_eq!(movie.title, "Batman");
        assert_eq!(movie.genre_ids, vec![14, 28]);
        assert_eq!(movie.vote_average, Some(7.23));
    }

    #[test]
    fn test_parse_nullable_fields() {
        let body = json!({
            "page": 2,
            "total_pages": 2,
            "results": [{
                "id": 1,
                "title": "Obscure",
                "poster_path": null,
                "backdrop_path": null,
                "release_date": "",
                "overview": ""
            }]
        })
        .to_string();

        let page = parse_result_page(&body).unwrap();
        let movie = &page.items[0];
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.release_date, None);
        assert_eq!(movie.overview, None);
        assert_eq!(movie.vote_average, None);
        assert_eq!(movie.vote_count, 0);
        assert!(movie.genre_ids.is_empty());
    }

    #[test]
    fn test_parse_explicit_nulls_default() {
        let body = json!({
            "page": 1,
            "total_pages": 1,
            "results": [{
                "id": 9,
                "title": "Nulls",
                "vote_count": null,
                "original_language": null,
                "genre_ids": null
            }]
        })
        .to_string();

        let page = parse_result_page(&body).unwrap();
        let movie = &page.items[0];
        assert_eq!(movie.vote_count, 0);
        assert_eq!(movie.original_language, "");
        assert!(movie.genre_ids.is_empty());
    }

    #[test]
    fn test_parse_falls_back_to_original_title() {
        let body = json!({
            "page": 1, "total_pages": 1,
            "results": [{"id": 5, "original_title": "Léon"}]
        })
        .to_string();
        assert_eq!(parse_result_page(&body).unwrap().items[0].title, "Léon");
    }

    #[test]
    fn test_parse_empty_results() {
        let body = json!({"page": 1, "total_pages": 0, "results": []}).to_string();
        let page = parse_result_page(&body).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_parse_failure_flag() {
        let body = json!({"Response": "False", "Error": "Invalid API key"}).to_string();
        match parse_result_page(&body) {
            Err(MoviesError::Api(msg)) => assert_eq!(msg, "Invalid API key"),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_results() {
        let body = json!({"page": 1, "total_pages": 3}).to_string();
        assert!(matches!(
            parse_result_page(&body),
            Err(MoviesError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_missing_movie_id() {
        let body = json!({"page": 1, "total_pages": 1, "results": [{"title": "No id"}]}).to_string();
        assert!(matches!(
            parse_result_page(&body),
            Err(MoviesError::ParseError(_))
        ));
    }
}
