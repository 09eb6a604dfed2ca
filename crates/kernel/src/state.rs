//! Application state shared across all handlers.

use std::sync::Arc;

use crate::services::{ArticleService, CommentService, TopicService, UserService};
use crate::store::Store;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn Store>,
    articles: ArticleService,
    comments: CommentService,
    topics: TopicService,
    users: UserService,
}

impl AppState {
    /// Build the state around an already-connected store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                articles: ArticleService::new(store.clone()),
                comments: CommentService::new(store.clone()),
                topics: TopicService::new(store.clone()),
                users: UserService::new(store.clone()),
                store,
            }),
        }
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.inner.store
    }

    pub fn articles(&self) -> &ArticleService {
        &self.inner.articles
    }

    pub fn comments(&self) -> &CommentService {
        &self.inner.comments
    }

    pub fn topics(&self) -> &TopicService {
        &self.inner.topics
    }

    pub fn users(&self) -> &UserService {
        &self.inner.users
    }

    /// Check if the store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.inner.store.ping().await
    }
}
