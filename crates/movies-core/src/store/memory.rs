//! In-memory document store

use std::cmp::Ordering;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::{Document, DocumentStore, Query};
use crate::error::{MoviesError, Result};

#[derive(Debug, Default)]
struct Collection {
    documents: Vec<Document>,
    next_id: u64,
}

/// Document store kept in process memory, in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.inner.lock().await.documents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Snapshot of every stored document
    pub async fn documents(&self) -> Vec<Document> {
        self.inner.lock().await.documents.clone()
    }
}

/// Numbers compare numerically, strings lexically, anything else is equal
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(&self, queries: &[Query]) -> Result<Vec<Document>> {
        let collection = self.inner.lock().await;

        let mut docs: Vec<Document> = collection
            .documents
            .iter()
            .filter(|doc| {
                queries.iter().all(|q| match q {
                    Query::Equal { attribute, values } => doc
                        .get(attribute)
                        .map(|v| values.contains(v))
                        .unwrap_or(false),
                    _ => true,
                })
            })
            .cloned()
            .collect();

        for query in queries {
            if let Query::OrderDesc(attribute) = query {
                // Stable sort: ties keep insertion order
                docs.sort_by(|a, b| compare_values(b.get(attribute), a.get(attribute)));
            }
        }

        if let Some(limit) = queries.iter().find_map(|q| match q {
            Query::Limit(n) => Some(*n as usize),
            _ => None,
        }) {
            docs.truncate(limit);
        }

        Ok(docs)
    }

    async fn create_document(&self, data: Map<String, Value>) -> Result<Document> {
        let mut collection = self.inner.lock().await;
        collection.next_id += 1;
        let doc = Document {
            id: format!("doc{}", collection.next_id),
            data,
        };
        collection.documents.push(doc.clone());
        Ok(doc)
    }

    async fn update_document(&self, id: &str, data: Map<String, Value>) -> Result<Document> {
        let mut collection = self.inner.lock().await;
        let doc = collection
            .documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or_else(|| MoviesError::Store(format!("document {} not found", id)))?;

        doc.data.extend(data);
        Ok(doc.clone())
    }
}
