//! Document store collaborators
//!
//! Trending searches live in a single collection of a hosted document
//! database. [`DocumentStore`] is the narrow interface the trending counter
//! needs: list with filters, create, update.
//! - `appwrite`: REST client for an Appwrite collection
//! - `memory`: in-process store for tests and store-less sessions

pub mod appwrite;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::Result;

pub use appwrite::AppwriteStore;
pub use memory::MemoryStore;

/// A stored document: store-assigned ID plus its fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Map<String, Value>,
}

impl Document {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }
}

/// List query clauses
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Field equals any of the given values
    Equal { attribute: String, values: Vec<Value> },
    /// Sort by field, largest first
    OrderDesc(String),
    /// Return at most this many documents
    Limit(u32),
}

impl Query {
    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Query::Equal {
            attribute: attribute.into(),
            values: vec![value.into()],
        }
    }

    pub fn order_desc(attribute: impl Into<String>) -> Self {
        Query::OrderDesc(attribute.into())
    }

    pub fn limit(n: u32) -> Self {
        Query::Limit(n)
    }

    /// Appwrite JSON query representation
    pub fn to_json(&self) -> Value {
        match self {
            Query::Equal { attribute, values } => {
                json!({"method": "equal", "attribute": attribute, "values": values})
            }
            Query::OrderDesc(attribute) => json!({"method": "orderDesc", "attribute": attribute}),
            Query::Limit(n) => json!({"method": "limit", "values": [n]}),
        }
    }
}

/// A generic document collection
///
/// No transactions and no atomic increment: callers doing read-modify-write
/// can lose updates under concurrent writers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List documents matching all `queries`.
    async fn list_documents(&self, queries: &[Query]) -> Result<Vec<Document>>;

    /// Create a document with a store-assigned unique ID.
    async fn create_document(&self, data: Map<String, Value>) -> Result<Document>;

    /// Overwrite the given fields of an existing document.
    async fn update_document(&self, id: &str, data: Map<String, Value>) -> Result<Document>;
}
