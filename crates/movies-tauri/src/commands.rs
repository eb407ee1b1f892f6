//! Tauri commands for the movie finder
//!
//! This module contains all Tauri commands that can be invoked from the frontend.
//! Errors cross the boundary as the user-facing message, never the raw cause.

use tauri::State;

use crate::AppState;
use movies_core::{ControllerSnapshot, MovieDetails, MovieSummary, ResultPage, TrendingEntry};

/// Feed the raw search box contents to the debouncer.
///
/// The term is committed (and page 1 fetched) once typing pauses for 500 ms.
///
/// # Arguments
/// * `term` - Search box contents exactly as typed
#[tauri::command]
pub fn set_search_term(state: State<'_, AppState>, term: String) {
    state.input().set(term);
}

/// Fetch one page for an explicit query, bypassing the debouncer.
///
/// An empty query lists popular movies.
///
/// # Arguments
/// * `query` - Search term, or empty for discovery
/// * `page` - Page number (1-based)
///
/// # Returns
/// * `Ok(ResultPage)` with the fetched page
/// * `Err(String)` with the message to show if the fetch fails
#[tauri::command]
pub async fn fetch_page(
    state: State<'_, AppState>,
    query: String,
    page: u32,
) -> Result<ResultPage, String> {
    state
        .controller()
        .fetch_page(&query, page)
        .await
        .map_err(|e| e.user_message())
}

/// Load the next page of the committed query.
///
/// # Returns
/// * `Ok(None)` if there is no next page or a fetch is still running
/// * `Ok(Some(ResultPage))` with the new page
/// * `Err(String)` with the message to show if the fetch fails
#[tauri::command]
pub async fn next_page(state: State<'_, AppState>) -> Result<Option<ResultPage>, String> {
    state
        .controller()
        .next_page()
        .await
        .transpose()
        .map_err(|e| e.user_message())
}

/// Load the previous page of the committed query.
///
/// # Returns
/// * `Ok(None)` on page 1 or while a fetch is still running
/// * `Ok(Some(ResultPage))` with the new page
/// * `Err(String)` with the message to show if the fetch fails
#[tauri::command]
pub async fn prev_page(state: State<'_, AppState>) -> Result<Option<ResultPage>, String> {
    state
        .controller()
        .prev_page()
        .await
        .transpose()
        .map_err(|e| e.user_message())
}

/// Current results with pagination and loading flags.
#[tauri::command]
pub async fn results(state: State<'_, AppState>) -> Result<ControllerSnapshot, String> {
    Ok(state.controller().snapshot().await)
}

/// Trending searches, highest count first, as loaded at start-up.
#[tauri::command]
pub fn trending_movies(state: State<'_, AppState>) -> Vec<TrendingEntry> {
    state.trending().to_vec()
}

/// Details view for a movie, including its first trailer when one exists.
///
/// # Arguments
/// * `movie` - Listing entry the user opened
#[tauri::command]
pub async fn movie_details(
    state: State<'_, AppState>,
    movie: MovieSummary,
) -> Result<MovieDetails, String> {
    Ok(MovieDetails::load(
        state.source(),
        &movie,
        state.genres(),
        state.image_base_url(),
    )
    .await)
}
