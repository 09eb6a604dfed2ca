//! Comment listing and mutation pipeline.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::required;
use crate::error::{AppError, AppResult};
use crate::gate;
use crate::models::{Comment, CreateComment, NewComment, VoteUpdate};
use crate::query::RawPageParams;
use crate::store::{Reference, Store};

/// One page of comments for an article.
#[derive(Debug, Clone, Serialize)]
pub struct CommentPage {
    pub comments: Vec<Comment>,

    /// Comments attached to the article across all pages.
    pub total_count: i64,
}

/// Comment service.
pub struct CommentService {
    store: Arc<dyn Store>,
}

impl CommentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Comments for an article, newest first.
    pub async fn list_for_article(
        &self,
        article_id: i32,
        raw: &RawPageParams,
    ) -> AppResult<CommentPage> {
        let page = raw.validate()?;

        gate::require(self.store.as_ref(), &Reference::Article(article_id)).await?;

        let (comments, total_count) = tokio::try_join!(
            self.store.list_comments(article_id, &page),
            self.store.count_comments(article_id)
        )?;

        debug!(article_id, returned = comments.len(), total_count, "listed comments");

        Ok(CommentPage {
            comments,
            total_count,
        })
    }

    /// Post a comment once the article and author are known to exist.
    pub async fn create(&self, article_id: i32, input: CreateComment) -> AppResult<Comment> {
        let comment = NewComment {
            article_id,
            author: required(input.username, "username")?,
            body: required(input.body, "body")?,
        };

        gate::require_all(
            self.store.as_ref(),
            &[
                Reference::Article(article_id),
                Reference::user(comment.author.as_str()),
            ],
        )
        .await?;

        let comment = self.store.insert_comment(&comment).await?;
        info!(
            comment_id = comment.comment_id,
            article_id,
            author = %comment.author,
            "comment created"
        );

        Ok(comment)
    }

    /// Apply a signed vote delta and return the updated comment.
    pub async fn add_votes(&self, comment_id: i32, update: &VoteUpdate) -> AppResult<Comment> {
        let delta = update.delta()?;
        let reference = Reference::Comment(comment_id);

        gate::require(self.store.as_ref(), &reference).await?;

        let comment = self
            .store
            .add_comment_votes(comment_id, delta)
            .await?
            .ok_or(AppError::Missing(reference))?;
        debug!(comment_id, delta, votes = comment.votes, "comment votes adjusted");

        Ok(comment)
    }

    /// Delete a comment.
    pub async fn delete(&self, comment_id: i32) -> AppResult<()> {
        let reference = Reference::Comment(comment_id);

        gate::require(self.store.as_ref(), &reference).await?;

        if !self.store.delete_comment(comment_id).await? {
            return Err(AppError::Missing(reference));
        }
        info!(comment_id, "comment deleted");

        Ok(())
    }
}
