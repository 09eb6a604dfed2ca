//! HTTP route handlers.

pub mod api;
pub mod articles;
pub mod comments;
pub mod extract;
pub mod health;
pub mod topics;
pub mod users;

use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// Assemble the full application router.
///
/// Resource routes mount under `/api`; `/health` sits at the root. Anything
/// else answers 404 `{"msg": "Path Not Found"}`.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(api::router())
        .merge(topics::router())
        .merge(articles::router())
        .merge(comments::router())
        .merge(users::router());

    Router::new()
        .nest("/api", api)
        .merge(health::router())
        .fallback(path_not_found)
        .with_state(state)
}

async fn path_not_found() -> AppError {
    AppError::not_found("Path Not Found")
}
