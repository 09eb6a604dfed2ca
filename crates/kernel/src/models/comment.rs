//! Comment records attached to articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Identifier assigned by the store.
    pub comment_id: i32,

    /// Comment body.
    pub body: String,

    /// Article the comment belongs to.
    pub article_id: i32,

    /// Username of the author.
    pub author: String,

    /// Vote tally. Only ever adjusted by a signed delta.
    pub votes: i32,

    /// Creation timestamp, assigned by the store.
    pub created_at: DateTime<Utc>,
}

/// Raw request body for posting a comment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateComment {
    pub username: Option<String>,
    pub body: Option<String>,
}

/// Validated input for inserting a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub article_id: i32,
    pub author: String,
    pub body: String,
}
