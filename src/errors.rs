use thiserror::Error;

use crate::clients::ClientError;
use crate::distributions::DistributionError;
use crate::objects::ObjectStorageError;
use crate::payments::PaymentError;
use crate::rooms::RoomError;
use crate::store::StoreError;
use crate::users::UserError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the back-office core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Object storage operation failed: {0}")]
    ObjectStorage(#[from] ObjectStorageError),

    #[error("Client directory error: {0}")]
    Client(#[from] ClientError),

    #[error("Room operation failed: {0}")]
    Room(#[from] RoomError),

    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    #[error("User lookup error: {0}")]
    User(#[from] UserError),

    #[error("Input validation failed: {0}")]
    Validation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

// Add From implementation for serde_json::Error
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Store(StoreError::Serialization(err.to_string()))
    }
}
