//! Article routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;

use super::extract::{JsonBody, QueryParams, parse_id};
use crate::error::AppResult;
use crate::models::{Article, ArticleSummary, CreateArticle, VoteUpdate};
use crate::query::RawArticleParams;
use crate::state::AppState;

// =============================================================================
// Response Types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ArticleCount {
    pub total_count: i64,
}

#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleSummary>,
    pub count: ArticleCount,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub article: Article,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /articles
async fn list_articles(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<RawArticleParams>,
) -> AppResult<Json<ArticleListResponse>> {
    let page = state.articles().list(&params).await?;

    Ok(Json(ArticleListResponse {
        articles: page.articles,
        count: ArticleCount {
            total_count: page.total_count,
        },
    }))
}

/// POST /articles
async fn create_article(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateArticle>,
) -> AppResult<(StatusCode, Json<ArticleResponse>)> {
    let article = state.articles().create(input).await?;
    Ok((StatusCode::CREATED, Json(ArticleResponse { article })))
}

/// GET /articles/{article_id}
async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> AppResult<Json<ArticleResponse>> {
    let article = state.articles().get(parse_id(&article_id)?).await?;
    Ok(Json(ArticleResponse { article }))
}

/// PATCH /articles/{article_id}
async fn update_article_votes(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    JsonBody(update): JsonBody<VoteUpdate>,
) -> AppResult<Json<ArticleResponse>> {
    let article_id = parse_id(&article_id)?;
    let article = state.articles().add_votes(article_id, &update).await?;
    Ok(Json(ArticleResponse { article }))
}

/// DELETE /articles/{article_id}
async fn delete_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> AppResult<StatusCode> {
    state.articles().delete(parse_id(&article_id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/articles", get(list_articles).post(create_article))
        .route(
            "/articles/{article_id}",
            get(get_article)
                .patch(update_article_votes)
                .delete(delete_article),
        )
}
