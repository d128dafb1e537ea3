//! HTTP client for the managed document database

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::future::Future;
use std::time::Duration;

use super::document::{CollectionPath, Document, Filter, WriteBatch, WriteOp};
use super::store_errors::StoreError;
use super::store_traits::DocumentStore;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Document store reached over plain JSON request/response calls.
/// Every call is bounded by a timeout; a timeout is a distinct,
/// retryable error rather than a generic network failure.
#[derive(Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct AddResponse {
    id: String,
}

#[derive(Deserialize)]
struct BatchResponse {
    committed: bool,
    #[serde(default)]
    applied: usize,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(StoreError::from)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, path: &CollectionPath) -> String {
        format!("{}/collections/{}", self.base_url, path.to_uri())
    }

    fn doc_url(&self, path: &CollectionPath, id: &str) -> String {
        format!("{}/{}", self.collection_url(path), urlencoding::encode(id))
    }

    /// Bounds a store call with the uniform request timeout
    async fn bounded<T, F>(&self, what: &str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS), fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(format!(
                "{} exceeded {}s",
                what, REQUEST_TIMEOUT_SECS
            ))),
        }
    }

    fn wire_op(op: &WriteOp) -> Value {
        match op {
            WriteOp::Set { path, id, data } => json!({
                "op": "set",
                "path": path.to_uri(),
                "id": id,
                "data": data,
            }),
            WriteOp::Update { path, id, patch } => json!({
                "op": "update",
                "path": path.to_uri(),
                "id": id,
                "data": patch,
            }),
        }
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn list(&self, path: &CollectionPath) -> Result<Vec<Document>, StoreError> {
        let url = self.collection_url(path);
        self.bounded("list", async {
            let resp = self.client.get(&url).send().await?.error_for_status()?;
            Ok(resp.json::<Vec<Document>>().await?)
        })
        .await
    }

    async fn query(
        &self,
        path: &CollectionPath,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}/query", self.collection_url(path));
        let body = json!({ "filters": filters });
        self.bounded("query", async {
            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await?
                .error_for_status()?;
            Ok(resp.json::<Vec<Document>>().await?)
        })
        .await
    }

    async fn get(&self, path: &CollectionPath, id: &str) -> Result<Option<Document>, StoreError> {
        let url = self.doc_url(path, id);
        self.bounded("get", async {
            let resp = self.client.get(&url).send().await?;
            if resp.status() == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            let resp = resp.error_for_status()?;
            Ok(Some(resp.json::<Document>().await?))
        })
        .await
    }

    async fn set(&self, path: &CollectionPath, id: &str, data: Value) -> Result<(), StoreError> {
        let url = self.doc_url(path, id);
        self.bounded("set", async {
            self.client
                .put(&url)
                .json(&data)
                .send()
                .await?
                .error_for_status()?;
            Ok(())
        })
        .await
    }

    async fn add(&self, path: &CollectionPath, data: Value) -> Result<String, StoreError> {
        let url = self.collection_url(path);
        self.bounded("add", async {
            let resp = self
                .client
                .post(&url)
                .json(&data)
                .send()
                .await?
                .error_for_status()?;
            Ok(resp.json::<AddResponse>().await?.id)
        })
        .await
    }

    async fn update(
        &self,
        path: &CollectionPath,
        id: &str,
        patch: Value,
    ) -> Result<(), StoreError> {
        let url = self.doc_url(path, id);
        self.bounded("update", async {
            let resp = self.client.patch(&url).json(&patch).send().await?;
            if resp.status() == StatusCode::NOT_FOUND {
                return Err(StoreError::NotFound(format!("{}/{}", path, id)));
            }
            resp.error_for_status()?;
            Ok(())
        })
        .await
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let total = batch.len();
        let ops: Vec<Value> = batch.ops().iter().map(Self::wire_op).collect();
        let url = format!("{}/batch", self.base_url);
        self.bounded("commit", async {
            let resp = self
                .client
                .post(&url)
                .json(&json!({ "ops": ops }))
                .send()
                .await?
                .error_for_status()?;
            let result = resp.json::<BatchResponse>().await?;
            if result.committed {
                Ok(())
            } else {
                Err(StoreError::PartialWrite {
                    applied: result.applied,
                    total,
                })
            }
        })
        .await
    }
}
