//! Read and mutation services.
//!
//! Each service owns an injected [`Store`](crate::store::Store) handle and
//! runs the pipeline for its resource: required-field checks, existence
//! gating, the write itself, and composing the returned row.

pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;

pub use articles::{ArticlePage, ArticleService};
pub use comments::{CommentPage, CommentService};
pub use topics::TopicService;
pub use users::UserService;

use crate::error::{AppError, AppResult};
use crate::models::VoteDeltaError;

/// Require a non-blank string field.
fn required(value: Option<String>, field: &'static str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::MissingField(field)),
    }
}

impl From<VoteDeltaError> for AppError {
    fn from(err: VoteDeltaError) -> Self {
        match err {
            VoteDeltaError::Missing => AppError::MissingField("inc_votes"),
            VoteDeltaError::Malformed => AppError::MalformedInput,
        }
    }
}
