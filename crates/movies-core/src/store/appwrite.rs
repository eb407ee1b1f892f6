//! Appwrite REST client scoped to one collection

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{Document, DocumentStore, Query};
use crate::config::StoreConfig;
use crate::error::{MoviesError, Result};

const PROJECT_HEADER: &str = "x-appwrite-project";
const KEY_HEADER: &str = "x-appwrite-key";

#[derive(Debug, Deserialize)]
struct DocumentList {
    documents: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Split an Appwrite document into its `$id` and user fields.
fn into_document(mut raw: Map<String, Value>) -> Result<Document> {
    let id = match raw.remove("$id") {
        Some(Value::String(id)) => id,
        _ => return Err(MoviesError::Store("document without $id".to_string())),
    };
    raw.retain(|key, _| !key.starts_with('$'));
    Ok(Document { id, data: raw })
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| MoviesError::InvalidHeader(what.to_string()))
}

/// Document store backed by an Appwrite database collection
pub struct AppwriteStore {
    client: reqwest::Client,
    documents_url: String,
}

impl AppwriteStore {
    /// Create a store client for the configured collection
    ///
    /// # Errors
    /// Returns an error if a header value is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(PROJECT_HEADER),
            header_value(&config.project_id, "project id")?,
        );
        if let Some(key) = &config.api_key {
            let mut value = header_value(key, "api key")?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(KEY_HEADER), value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let documents_url = format!(
            "{}/databases/{}/collections/{}/documents",
            config.endpoint.trim_end_matches('/'),
            urlencoding::encode(&config.database_id),
            urlencoding::encode(&config.collection_id),
        );

        Ok(Self {
            client,
            documents_url,
        })
    }

    async fn read(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| "no message".to_string());
        Err(MoviesError::Store(format!(
            "status {}: {}",
            status.as_u16(),
            message
        )))
    }

    fn parse_one(value: Value) -> Result<Document> {
        match value {
            Value::Object(raw) => into_document(raw),
            _ => Err(MoviesError::Store("expected a document object".to_string())),
        }
    }
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn list_documents(&self, queries: &[Query]) -> Result<Vec<Document>> {
        let query_string = queries
            .iter()
            .map(|q| format!("queries[]={}", urlencoding::encode(&q.to_json().to_string())))
            .collect::<Vec<_>>()
            .join("&");
        let url = if query_string.is_empty() {
            self.documents_url.clone()
        } else {
            format!("{}?{}", self.documents_url, query_string)
        };

        tracing::debug!(%url, "listing documents");
        let response = self.client.get(&url).send().await?;
        let value = self.read(response).await?;
        let list: DocumentList = serde_json::from_value(value)
            .map_err(|e| MoviesError::Store(format!("document list: {}", e)))?;

        list.documents.into_iter().map(into_document).collect()
    }

    async fn create_document(&self, data: Map<String, Value>) -> Result<Document> {
        let body = json!({"documentId": "unique()", "data": data});
        let response = self
            .client
            .post(&self.documents_url)
            .json(&body)
            .send()
            .await?;
        Self::parse_one(self.read(response).await?)
    }

    async fn update_document(&self, id: &str, data: Map<String, Value>) -> Result<Document> {
        let url = format!("{}/{}", self.documents_url, urlencoding::encode(id));
        let response = self
            .client
            .patch(&url)
            .json(&json!({"data": data}))
            .send()
            .await?;
        Self::parse_one(self.read(response).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DOCS_PATH: &str = "/databases/db/collections/trending/documents";

    fn store(server: &MockServer) -> AppwriteStore {
        AppwriteStore::new(&StoreConfig {
            endpoint: server.uri(),
            project_id: "proj".to_string(),
            database_id: "db".to_string(),
            collection_id: "trending".to_string(),
            api_key: Some("key".to_string()),
        })
        .unwrap()
    }

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_into_document_strips_system_fields() {
        let raw = fields(json!({"$id": "a1", "$collectionId": "c", "count": 2}));
        let doc = into_document(raw).unwrap();
        assert_eq!(doc.id, "a1");
        assert_eq!(doc.data.len(), 1);
        assert_eq!(doc.get("count"), Some(&json!(2)));
    }

    #[test]
    fn test_into_document_requires_id() {
        assert!(into_document(fields(json!({"count": 2}))).is_err());
    }

    #[tokio::test]
    async fn test_list_sends_queries_and_headers() {
        let server = MockServer::start().await;
        let equal = Query::equal("searchTerm", "batman").to_json().to_string();
        Mock::given(method("GET"))
            .and(path(DOCS_PATH))
            .and(query_param("queries[]", equal.as_str()))
            .and(header("x-appwrite-project", "proj"))
            .and(header("x-appwrite-key", "key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 1,
                "documents": [{"$id": "d1", "searchTerm": "batman", "count": 4}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let docs = store(&server)
            .list_documents(&[Query::equal("searchTerm", "batman")])
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "d1");
    }

    #[tokio::test]
    async fn test_create_requests_unique_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(DOCS_PATH))
            .and(body_json(json!({"documentId": "unique()", "data": {"count": 1}})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"$id": "new1", "count": 1})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let doc = store(&server)
            .create_document(fields(json!({"count": 1})))
            .await
            .unwrap();
        assert_eq!(doc.id, "new1");
    }

    #[tokio::test]
    async fn test_update_patches_document() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path(format!("{}/d1", DOCS_PATH)))
            .and(body_json(json!({"data": {"count": 5}})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"$id": "d1", "count": 5})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let doc = store(&server)
            .update_document("d1", fields(json!({"count": 5})))
            .await
            .unwrap();
        assert_eq!(doc.get("count"), Some(&json!(5)));
    }

    #[tokio::test]
    async fn test_error_status_maps_to_store_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"message": "Collection not found", "code": 404})),
            )
            .mount(&server)
            .await;

        match store(&server).list_documents(&[]).await {
            Err(MoviesError::Store(msg)) => assert_eq!(msg, "status 404: Collection not found"),
            other => panic!("Expected Store error, got {:?}", other),
        }
    }
}
