//! User routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::User;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

async fn list_users(State(state): State<AppState>) -> AppResult<Json<UserListResponse>> {
    let users = state.users().list().await?;
    Ok(Json(UserListResponse { users }))
}

async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.users().get(&username).await?;
    Ok(Json(UserResponse { user }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{username}", get(get_user))
}
