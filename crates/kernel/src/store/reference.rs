//! Typed references to rows that a mutation depends on.

use std::fmt;

/// A row identified by table, column and value.
///
/// Table and column names come only from this closed set, so an existence
/// check can never be pointed at an arbitrary relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    /// `articles.article_id`
    Article(i32),
    /// `comments.comment_id`
    Comment(i32),
    /// `users.username`
    User(String),
    /// `topics.slug`
    Topic(String),
}

impl Reference {
    pub fn user(username: impl Into<String>) -> Self {
        Self::User(username.into())
    }

    pub fn topic(slug: impl Into<String>) -> Self {
        Self::Topic(slug.into())
    }

    pub fn table(&self) -> &'static str {
        match self {
            Self::Article(_) => "articles",
            Self::Comment(_) => "comments",
            Self::User(_) => "users",
            Self::Topic(_) => "topics",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::Article(_) => "article_id",
            Self::Comment(_) => "comment_id",
            Self::User(_) => "username",
            Self::Topic(_) => "slug",
        }
    }

    /// Referenced value rendered as text.
    pub fn value(&self) -> String {
        match self {
            Self::Article(id) | Self::Comment(id) => id.to_string(),
            Self::User(s) | Self::Topic(s) => s.clone(),
        }
    }

    /// Message shown to clients when the row is missing.
    pub fn not_found_message(&self) -> String {
        format!("{} {} not found", self.column(), self.value())
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} = {}", self.table(), self.column(), self.value())
    }
}
