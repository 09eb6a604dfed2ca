//! Request extractors that reject with [`AppError`] instead of axum's
//! plain-text defaults.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::query::ParamError;

/// JSON request body. Any decoding failure is [`AppError::MalformedInput`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "rejected request body");
                AppError::MalformedInput
            })?;
        Ok(Self(value))
    }
}

/// Query string. An undecodable query is [`AppError::InvalidQuery`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "rejected query string");
                AppError::InvalidQuery(ParamError::Undecodable)
            })?;
        Ok(Self(value))
    }
}

/// Parse a numeric path segment such as an article or comment id.
pub fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse().map_err(|_| AppError::MalformedInput)
}
