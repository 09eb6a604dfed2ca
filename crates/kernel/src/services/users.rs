//! User lookups.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::gate;
use crate::models::User;
use crate::store::{Reference, Store};

/// User service.
pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.store.list_users().await?)
    }

    pub async fn get(&self, username: &str) -> AppResult<User> {
        let reference = Reference::user(username);

        gate::require(self.store.as_ref(), &reference).await?;

        self.store
            .find_user(username)
            .await?
            .ok_or(AppError::Missing(reference))
    }
}
