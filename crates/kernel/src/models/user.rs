//! User records.

use serde::{Deserialize, Serialize};

/// User record. The username is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub username: String,

    /// Display name.
    pub name: String,

    pub avatar_url: String,
}
