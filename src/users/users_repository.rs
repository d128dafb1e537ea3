use async_trait::async_trait;
use std::sync::Arc;

use crate::constants::USERS_COLLECTION;
use crate::store::{CollectionPath, DocumentStore, Filter};

use super::users_model::User;
use super::users_traits::UserRepositoryTrait;
use super::Result;

/// Store-backed repository over the `users` collection
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let docs = self
            .store
            .query(
                &CollectionPath::root(USERS_COLLECTION),
                &[Filter::eq("email", email)],
            )
            .await?;
        docs.first().map(|d| d.deserialize::<User>()).transpose().map_err(Into::into)
    }
}
