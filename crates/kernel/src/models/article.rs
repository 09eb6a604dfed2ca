//! Article records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image used when an article is created without one.
pub const DEFAULT_ARTICLE_IMG_URL: &str =
    "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700";

/// Article as it appears in collection listings.
///
/// The free-text body is deliberately absent; it is only exposed through
/// the single-resource view ([`Article`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArticleSummary {
    pub article_id: i32,
    pub author: String,
    pub title: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,

    /// Number of comments attached to the article.
    pub comment_count: i64,
}

/// Full article record, including body and aggregated comment count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    /// Identifier assigned by the store.
    pub article_id: i32,

    /// Username of the author.
    pub author: String,

    pub title: String,

    pub body: String,

    /// Slug of the topic the article is filed under.
    pub topic: String,

    /// Creation timestamp, assigned by the store.
    pub created_at: DateTime<Utc>,

    /// Vote tally. Only ever adjusted by a signed delta.
    pub votes: i32,

    pub article_img_url: String,

    /// Number of comments attached to the article.
    pub comment_count: i64,
}

impl Article {
    /// Collection view of this article.
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            article_id: self.article_id,
            author: self.author.clone(),
            title: self.title.clone(),
            topic: self.topic.clone(),
            created_at: self.created_at,
            votes: self.votes,
            article_img_url: self.article_img_url.clone(),
            comment_count: self.comment_count,
        }
    }
}

/// Raw request body for creating an article.
///
/// Every field is optional at this stage so that missing fields can be
/// reported as such rather than as a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateArticle {
    pub author: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub topic: Option<String>,
    pub article_img_url: Option<String>,
}

/// Validated input for inserting an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub author: String,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub article_img_url: String,
}
