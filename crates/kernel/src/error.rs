//! Application error types.
//!
//! Every failure a handler can produce ends up here and is rendered as
//! `{"msg": "..."}` with a status code from a small, fixed taxonomy.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::ParamError;
use crate::store::{Reference, StoreError};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input of the wrong type or shape, such as a non-numeric id.
    #[error("Bad Request")]
    MalformedInput,

    /// A required body field was absent or empty.
    #[error("Required information is missing")]
    MissingField(&'static str),

    /// A query-string parameter failed whitelist validation.
    #[error("Invalid Query Passed")]
    InvalidQuery(#[from] ParamError),

    /// A referenced row does not exist.
    #[error("{}", .0.not_found_message())]
    Missing(Reference),

    /// Resource-specific not-found phrasing.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness rule rejected the write.
    #[error("{0}")]
    Conflict(String),

    #[error("store error")]
    Store(#[source] StoreError),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub msg: String,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedInput | AppError::MissingField(_) | AppError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Missing(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { .. } => AppError::conflict("Resource already exists"),
            // The referenced row vanished between the existence check and the write.
            StoreError::ForeignKeyViolation { .. } => {
                AppError::not_found("Referenced resource not found")
            }
            StoreError::InvalidRepresentation
            | StoreError::NotNullViolation
            | StoreError::OutOfRange => AppError::MalformedInput,
            other => AppError::Store(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server faults are logged in full but never described to the caller
        let msg = match &self {
            AppError::Store(e) => {
                tracing::error!(error = ?e, "store error");
                "Internal Server Error".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "internal server error");
                "Internal Server Error".to_string()
            }
            AppError::MissingField(field) => {
                tracing::debug!(field, "required field missing");
                self.to_string()
            }
            AppError::InvalidQuery(e) => {
                tracing::debug!(reason = %e, "invalid query parameter");
                self.to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { msg })).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
