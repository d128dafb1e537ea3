use thiserror::Error;

use crate::clients::ClientError;
use crate::store::StoreError;

/// Custom error type for distribution persistence
#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Client directory error: {0}")]
    Client(#[from] ClientError),

    #[error("Not found: {0}")]
    NotFound(String),
}
