//! Blob-storage collaborator: named-object upload and URL retrieval

mod http;
mod memory;
mod paths;

pub use http::HttpObjectStore;
pub use memory::MemoryObjectStore;
pub use paths::{offer_path, visa_path};

use async_trait::async_trait;
use thiserror::Error;

/// Custom error type for object-storage operations
#[derive(Debug, Error)]
pub enum ObjectStorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Call timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ObjectStorageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ObjectStorageError::Timeout(err.to_string())
        } else {
            ObjectStorageError::Network(err.to_string())
        }
    }
}

/// Result type for object-storage operations
pub type Result<T> = std::result::Result<T, ObjectStorageError>;

/// Contract for the external object store. Paths are deterministic, derived
/// from domain keys (passport number, offer title); no listing is needed.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload bytes under a named path, replacing any existing object
    async fn put_object(&self, path: &str, bytes: Vec<u8>) -> Result<()>;

    /// Resolve the download URL for a named object
    async fn get_url(&self, path: &str) -> Result<String>;
}
