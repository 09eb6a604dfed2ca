//! Topic records.

use serde::{Deserialize, Serialize};

/// Topic record. The slug is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Topic {
    pub slug: String,
    pub description: Option<String>,
}

/// Raw request body for creating a topic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTopic {
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// Validated input for inserting a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopic {
    pub slug: String,

    /// Absent or empty descriptions are stored as NULL.
    pub description: Option<String>,
}
