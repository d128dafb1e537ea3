//! In-memory object store used by tests

use async_trait::async_trait;
use dashmap::DashMap;

use super::{ObjectStorage, ObjectStorageError, Result};

/// Object store backed by process memory
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: DashMap<String, Vec<u8>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes of a stored object, for assertions
    pub fn object(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.get(path).map(|b| b.clone())
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStore {
    async fn put_object(&self, path: &str, bytes: Vec<u8>) -> Result<()> {
        self.objects.insert(path.to_string(), bytes);
        Ok(())
    }

    async fn get_url(&self, path: &str) -> Result<String> {
        if self.objects.contains_key(path) {
            Ok(format!("memory://{}", path))
        } else {
            Err(ObjectStorageError::NotFound(path.to_string()))
        }
    }
}
