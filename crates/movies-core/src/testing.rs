//! Shared fixtures for unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::oneshot;

use crate::catalog::MovieSource;
use crate::error::{MoviesError, Result};
use crate::store::{Document, DocumentStore, Query};
use crate::types::{MovieSummary, QueryMode, ResultPage, Video};

pub fn movie(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        poster_path: Some("/poster.jpg".to_string()),
        backdrop_path: Some("/backdrop.jpg".to_string()),
        release_date: Some("2008-07-16".to_string()),
        vote_average: Some(8.5),
        vote_count: 1000,
        original_language: "en".to_string(),
        genre_ids: vec![18, 28],
        overview: Some("Overview".to_string()),
    }
}

/// Page with `count` movies whose IDs start at `first_id`
pub fn page_of(first_id: u64, count: u64, page: u32, total_pages: u32) -> ResultPage {
    let items = (first_id..first_id + count)
        .map(|id| movie(id, &format!("Movie {}", id)))
        .collect();
    ResultPage::new(items, page, total_pages)
}

enum Reply {
    Ready(Result<ResultPage>),
    Gated(oneshot::Receiver<Result<ResultPage>>),
}

/// Movie source answering from a queue of scripted replies
#[derive(Default)]
pub struct ScriptedSource {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(QueryMode, u32)>>,
    videos: Mutex<HashMap<u64, Vec<Video>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, result: Result<ResultPage>) {
        self.replies.lock().unwrap().push_back(Reply::Ready(result));
    }

    /// Queue a reply that is held until the returned sender fires
    pub fn gated(&self) -> oneshot::Sender<Result<ResultPage>> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(Reply::Gated(rx));
        tx
    }

    pub fn with_videos(&self, movie_id: u64, videos: Vec<Video>) {
        self.videos.lock().unwrap().insert(movie_id, videos);
    }

    pub fn calls(&self) -> Vec<(QueryMode, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieSource for ScriptedSource {
    async fn fetch_page(&self, mode: &QueryMode, page: u32) -> Result<ResultPage> {
        self.calls.lock().unwrap().push((mode.clone(), page));
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(MoviesError::ParseError("gate dropped".to_string()))),
            None => Err(MoviesError::ParseError("no scripted reply".to_string())),
        }
    }

    async fn videos(&self, movie_id: u64) -> Result<Vec<Video>> {
        self.videos
            .lock()
            .unwrap()
            .get(&movie_id)
            .cloned()
            .ok_or(MoviesError::Status(404))
    }
}

/// Store whose every call fails
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn list_documents(&self, _queries: &[Query]) -> Result<Vec<Document>> {
        Err(MoviesError::Store("unavailable".to_string()))
    }

    async fn create_document(&self, _data: Map<String, Value>) -> Result<Document> {
        Err(MoviesError::Store("unavailable".to_string()))
    }

    async fn update_document(&self, _id: &str, _data: Map<String, Value>) -> Result<Document> {
        Err(MoviesError::Store("unavailable".to_string()))
    }
}
