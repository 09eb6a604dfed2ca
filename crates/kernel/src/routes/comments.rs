//! Comment routes, both nested under articles and addressed directly.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};
use serde::Serialize;

use super::extract::{JsonBody, QueryParams, parse_id};
use crate::error::AppResult;
use crate::models::{Comment, CreateComment, VoteUpdate};
use crate::query::RawPageParams;
use crate::state::AppState;

/// Message attached to the listing of an article nobody has commented on.
pub const NO_COMMENTS_MSG: &str = "No comments found for article";

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment: Comment,
}

/// GET /articles/{article_id}/comments
async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    QueryParams(params): QueryParams<RawPageParams>,
) -> AppResult<Json<CommentListResponse>> {
    let article_id = parse_id(&article_id)?;
    let page = state.comments().list_for_article(article_id, &params).await?;

    let msg = (page.total_count == 0).then_some(NO_COMMENTS_MSG);
    Ok(Json(CommentListResponse {
        comments: page.comments,
        msg,
    }))
}

/// POST /articles/{article_id}/comments
async fn create_comment(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    JsonBody(input): JsonBody<CreateComment>,
) -> AppResult<(StatusCode, Json<CommentResponse>)> {
    let article_id = parse_id(&article_id)?;
    let comment = state.comments().create(article_id, input).await?;
    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}

/// PATCH /comments/{comment_id}
async fn update_comment_votes(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    JsonBody(update): JsonBody<VoteUpdate>,
) -> AppResult<Json<CommentResponse>> {
    let comment_id = parse_id(&comment_id)?;
    let comment = state.comments().add_votes(comment_id, &update).await?;
    Ok(Json(CommentResponse { comment }))
}

/// DELETE /comments/{comment_id}
async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> AppResult<StatusCode> {
    state.comments().delete(parse_id(&comment_id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/articles/{article_id}/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/comments/{comment_id}",
            patch(update_comment_votes).delete(delete_comment),
        )
}
