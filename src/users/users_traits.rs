use async_trait::async_trait;

use super::users_model::User;
use super::Result;

/// Trait defining the contract for staff-user lookups.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Resolves a referrer email to the matching user, if any
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}
