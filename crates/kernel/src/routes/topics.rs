//! Topic routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use super::extract::JsonBody;
use crate::error::AppResult;
use crate::models::{CreateTopic, Topic};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TopicListResponse {
    pub topics: Vec<Topic>,
}

#[derive(Debug, Serialize)]
pub struct TopicResponse {
    pub topic: Topic,
}

async fn list_topics(State(state): State<AppState>) -> AppResult<Json<TopicListResponse>> {
    let topics = state.topics().list().await?;
    Ok(Json(TopicListResponse { topics }))
}

async fn create_topic(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateTopic>,
) -> AppResult<(StatusCode, Json<TopicResponse>)> {
    let topic = state.topics().create(input).await?;
    Ok((StatusCode::CREATED, Json(TopicResponse { topic })))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/topics", get(list_topics).post(create_topic))
}
