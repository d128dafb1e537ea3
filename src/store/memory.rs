//! In-memory document store used by tests and local tooling

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Mutex;

use super::document::{CollectionPath, Document, Filter, WriteBatch, WriteOp};
use super::store_errors::StoreError;
use super::store_traits::DocumentStore;

/// Document store backed by process memory. Collections keep insertion
/// order so scans are deterministic.
#[derive(Default)]
pub struct MemoryStore {
    collections: DashMap<String, Vec<Document>>,
    // Serializes batch commits so they are all-or-nothing
    commit_lock: Mutex<()>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(path: &CollectionPath) -> String {
        path.to_string()
    }

    fn merge(target: &mut Value, patch: &Value) {
        if let (Some(target_map), Some(patch_map)) = (target.as_object_mut(), patch.as_object()) {
            for (k, v) in patch_map {
                target_map.insert(k.clone(), v.clone());
            }
        }
    }

    fn apply_set(&self, path: &CollectionPath, id: &str, data: Value) {
        let mut docs = self.collections.entry(Self::key(path)).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(doc) => doc.data = data,
            None => docs.push(Document::new(id, data)),
        }
    }

    fn apply_update(&self, path: &CollectionPath, id: &str, patch: &Value) -> Result<(), StoreError> {
        let mut docs = self
            .collections
            .get_mut(&Self::key(path))
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", path, id)))?;
        let doc = docs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", path, id)))?;
        Self::merge(&mut doc.data, patch);
        Ok(())
    }

    fn exists(&self, path: &CollectionPath, id: &str) -> bool {
        self.collections
            .get(&Self::key(path))
            .map(|docs| docs.iter().any(|d| d.id == id))
            .unwrap_or(false)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, path: &CollectionPath) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .collections
            .get(&Self::key(path))
            .map(|docs| docs.clone())
            .unwrap_or_default())
    }

    async fn query(
        &self,
        path: &CollectionPath,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError> {
        let docs = self.list(path).await?;
        Ok(docs
            .into_iter()
            .filter(|doc| filters.iter().all(|f| f.matches(&doc.data)))
            .collect())
    }

    async fn get(&self, path: &CollectionPath, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collections
            .get(&Self::key(path))
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn set(&self, path: &CollectionPath, id: &str, data: Value) -> Result<(), StoreError> {
        self.apply_set(path, id, data);
        Ok(())
    }

    async fn add(&self, path: &CollectionPath, data: Value) -> Result<String, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        self.apply_set(path, &id, data);
        Ok(id)
    }

    async fn update(
        &self,
        path: &CollectionPath,
        id: &str,
        patch: Value,
    ) -> Result<(), StoreError> {
        self.apply_update(path, id, &patch)
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let _guard = self
            .commit_lock
            .lock()
            .map_err(|_| StoreError::InvalidData("commit lock poisoned".to_string()))?;

        // Validate every update target before touching anything, so a bad
        // batch rejects as a whole instead of applying partially. A set
        // earlier in the same batch counts as creating the target.
        let mut created: std::collections::HashSet<(String, String)> = Default::default();
        for op in batch.ops() {
            match op {
                WriteOp::Set { path, id, .. } => {
                    created.insert((Self::key(path), id.clone()));
                }
                WriteOp::Update { path, id, .. } => {
                    let known = self.exists(path, id)
                        || created.contains(&(Self::key(path), id.clone()));
                    if !known {
                        return Err(StoreError::NotFound(format!("{}/{}", path, id)));
                    }
                }
            }
        }

        for op in batch.into_ops() {
            match op {
                WriteOp::Set { path, id, data } => self.apply_set(&path, &id, data),
                WriteOp::Update { path, id, patch } => self.apply_update(&path, &id, &patch)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_get_update_roundtrip() {
        let store = MemoryStore::new();
        let path = CollectionPath::root("flights");

        store
            .set(&path, "f1", json!({"type": "omra", "emptySeats": 10}))
            .await
            .unwrap();
        store.update(&path, "f1", json!({"emptySeats": 9})).await.unwrap();

        let doc = store.get(&path, "f1").await.unwrap().unwrap();
        assert_eq!(doc.data["type"], "omra");
        assert_eq!(doc.data["emptySeats"], 9);
    }

    #[tokio::test]
    async fn query_applies_compound_equality() {
        let store = MemoryStore::new();
        let path = CollectionPath::root("roomDistribution");
        store
            .set(&path, "d1", json!({"flightDate": "2024-03-01", "flightType": "omra"}))
            .await
            .unwrap();
        store
            .set(&path, "d2", json!({"flightDate": "2024-03-01", "flightType": "hajj"}))
            .await
            .unwrap();

        let hits = store
            .query(
                &path,
                &[
                    Filter::eq("flightDate", "2024-03-01"),
                    Filter::eq("flightType", "omra"),
                ],
            )
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "d1");
    }

    #[tokio::test]
    async fn commit_rejects_batch_with_missing_update_target() {
        let store = MemoryStore::new();
        let path = CollectionPath::root("clients");
        store.set(&path, "c1", json!({"firstName": "Ali"})).await.unwrap();

        let mut batch = WriteBatch::new();
        batch.update(path.clone(), "c1", json!({"firstName": "Aly"}));
        batch.update(path.clone(), "missing", json!({"firstName": "X"}));

        let err = store.commit(batch).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        // The valid half of the rejected batch must not have been applied
        let doc = store.get(&path, "c1").await.unwrap().unwrap();
        assert_eq!(doc.data["firstName"], "Ali");
    }
}
