use async_trait::async_trait;
use serde_json::Value;

use super::document::{CollectionPath, Document, Filter, WriteBatch};
use super::store_errors::StoreError;

/// Contract for the external document database. Adapters receive a concrete
/// store at construction time so tests can substitute an in-memory one.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Full-collection scan
    async fn list(&self, path: &CollectionPath) -> Result<Vec<Document>, StoreError>;

    /// Equality-filtered scan; all filters must match
    async fn query(
        &self,
        path: &CollectionPath,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError>;

    /// Single document by id, `None` when absent
    async fn get(&self, path: &CollectionPath, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create or fully replace a document under a caller-chosen id
    async fn set(&self, path: &CollectionPath, id: &str, data: Value) -> Result<(), StoreError>;

    /// Create a document under a store-generated id
    async fn add(&self, path: &CollectionPath, data: Value) -> Result<String, StoreError>;

    /// Merge top-level fields into an existing document
    async fn update(&self, path: &CollectionPath, id: &str, patch: Value)
        -> Result<(), StoreError>;

    /// Apply a batch atomically; a partially applied batch must surface as
    /// `StoreError::PartialWrite`, never silently
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
