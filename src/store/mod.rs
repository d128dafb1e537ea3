mod document;
mod http;
mod memory;
mod store_errors;
mod store_traits;

pub use document::{CollectionPath, Document, Filter, WriteBatch, WriteOp};
pub use http::HttpStore;
pub use memory::MemoryStore;
pub use store_errors::StoreError;
pub use store_traits::DocumentStore;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
