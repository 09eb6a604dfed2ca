//! Topic listing and creation.

use std::sync::Arc;

use tracing::info;

use super::required;
use crate::error::{AppError, AppResult};
use crate::models::{CreateTopic, NewTopic, Topic};
use crate::store::{Store, StoreError};

/// Topic service.
pub struct TopicService {
    store: Arc<dyn Store>,
}

impl TopicService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Topic>> {
        Ok(self.store.list_topics().await?)
    }

    /// Create a topic. A duplicate slug is a conflict.
    pub async fn create(&self, input: CreateTopic) -> AppResult<Topic> {
        let topic = NewTopic {
            slug: required(input.slug, "slug")?,
            description: input.description.filter(|d| !d.is_empty()),
        };

        let topic = self.store.insert_topic(&topic).await.map_err(|e| match e {
            StoreError::UniqueViolation { .. } => AppError::conflict("Topic already exists"),
            other => AppError::from(other),
        })?;
        info!(slug = %topic.slug, "topic created");

        Ok(topic)
    }
}
