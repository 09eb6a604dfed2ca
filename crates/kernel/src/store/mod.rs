//! Relational store abstraction.
//!
//! Every read and write goes through the [`Store`] trait. The service layer
//! holds an `Arc<dyn Store>` and never touches a connection pool directly,
//! which lets tests swap in an in-memory implementation.

mod postgres;
mod reference;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Article, ArticleSummary, Comment, NewArticle, NewComment, NewTopic, Topic, User};
use crate::query::{ArticleListParams, Pagination};

pub use postgres::PgStore;
pub use reference::Reference;

/// Failures reported by a store, classified by cause.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("unique constraint violated{}", constraint_suffix(.constraint))]
    UniqueViolation { constraint: Option<String> },

    /// A foreign key pointed at a row that does not exist.
    #[error("foreign key constraint violated{}", constraint_suffix(.constraint))]
    ForeignKeyViolation { constraint: Option<String> },

    /// A value could not be parsed as the column type.
    #[error("invalid input representation")]
    InvalidRepresentation,

    /// A required column was left NULL.
    #[error("not-null constraint violated")]
    NotNullViolation,

    /// A numeric result did not fit its column.
    #[error("numeric value out of range")]
    OutOfRange,

    /// The statement or connection acquisition exceeded its deadline.
    #[error("store operation timed out")]
    Timeout,

    /// Anything else.
    #[error("store backend error")]
    Backend(#[source] anyhow::Error),
}

fn constraint_suffix(constraint: &Option<String>) -> String {
    constraint
        .as_deref()
        .map(|c| format!(" ({c})"))
        .unwrap_or_default()
}

/// Result type alias using StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// Relational store for articles, comments, topics and users.
#[async_trait]
pub trait Store: Send + Sync {
    /// Check that the store is reachable.
    async fn ping(&self) -> bool;

    /// Check whether the referenced row exists.
    async fn exists(&self, reference: &Reference) -> StoreResult<bool>;

    /// One page of the article collection view.
    async fn list_articles(&self, params: &ArticleListParams) -> StoreResult<Vec<ArticleSummary>>;

    /// Number of articles matching the listing's filter, ignoring pagination.
    async fn count_articles(&self, params: &ArticleListParams) -> StoreResult<i64>;

    /// Single article with body and comment count.
    async fn find_article(&self, article_id: i32) -> StoreResult<Option<Article>>;

    /// Insert an article, returning its new identifier.
    async fn insert_article(&self, article: &NewArticle) -> StoreResult<i32>;

    /// Add `delta` to an article's votes. Returns false if no row matched.
    async fn add_article_votes(&self, article_id: i32, delta: i32) -> StoreResult<bool>;

    /// Delete an article and its comments. Returns false if no row matched.
    async fn delete_article(&self, article_id: i32) -> StoreResult<bool>;

    /// One page of comments for an article, newest first.
    async fn list_comments(&self, article_id: i32, page: &Pagination)
    -> StoreResult<Vec<Comment>>;

    /// Total comments attached to an article.
    async fn count_comments(&self, article_id: i32) -> StoreResult<i64>;

    /// Insert a comment and return the stored row.
    async fn insert_comment(&self, comment: &NewComment) -> StoreResult<Comment>;

    /// Add `delta` to a comment's votes and return the updated row.
    async fn add_comment_votes(&self, comment_id: i32, delta: i32) -> StoreResult<Option<Comment>>;

    /// Delete a comment. Returns false if no row matched.
    async fn delete_comment(&self, comment_id: i32) -> StoreResult<bool>;

    /// All topics.
    async fn list_topics(&self) -> StoreResult<Vec<Topic>>;

    /// Insert a topic and return the stored row.
    async fn insert_topic(&self, topic: &NewTopic) -> StoreResult<Topic>;

    /// All users.
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Find a user by username.
    async fn find_user(&self, username: &str) -> StoreResult<Option<User>>;
}
