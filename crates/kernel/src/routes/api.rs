//! `GET /api`: a static description of every endpoint.

use std::sync::LazyLock;

use axum::{Json, Router, routing::get};
use serde_json::Value;
use tracing::error;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const ENDPOINTS_JSON: &str = include_str!("../../endpoints.json");

static ENDPOINTS: LazyLock<Result<Value, String>> =
    LazyLock::new(|| serde_json::from_str(ENDPOINTS_JSON).map_err(|e| e.to_string()));

async fn describe_endpoints() -> AppResult<Json<Value>> {
    match &*ENDPOINTS {
        Ok(endpoints) => Ok(Json(endpoints.clone())),
        Err(e) => {
            error!(error = %e, "endpoints.json is not valid JSON");
            Err(AppError::Internal(anyhow::anyhow!("invalid endpoints document")))
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(describe_endpoints))
}
