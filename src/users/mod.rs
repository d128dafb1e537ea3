mod users_model;
mod users_repository;
mod users_traits;

pub use users_model::User;
pub use users_repository::UserRepository;
pub use users_traits::UserRepositoryTrait;

use thiserror::Error;

/// Custom error type for staff-user lookups
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("No user found with email: {0}")]
    NotFound(String),
}

/// Result type for user operations
pub type Result<T> = std::result::Result<T, UserError>;
