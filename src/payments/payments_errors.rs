use thiserror::Error;

use crate::clients::ClientError;
use crate::store::StoreError;

/// Custom error type for payment reconciliation
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Client directory error: {0}")]
    Client(#[from] ClientError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}
