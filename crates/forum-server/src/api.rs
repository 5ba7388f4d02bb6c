//! Shared plumbing for the API handlers: the error type and store access.

use crate::AppState;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use forum_qa::QaError;
use rusqlite::Connection;
use std::sync::Arc;
use thiserror::Error;

/// Message sent to clients for any internal failure.
const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<QaError> for ApiError {
    fn from(e: QaError) -> Self {
        match e {
            QaError::InvalidInput(msg) => ApiError::BadRequest(msg),
            QaError::QuestionNotFound(_) => ApiError::NotFound("question not found".to_string()),
            QaError::AnswerNotFound(_) => ApiError::NotFound("answer not found".to_string()),
            QaError::Database(e) => ApiError::InternalServerError(format!("db query failed: {e}")),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Over-limit bodies surface as a buffering failure with status 413.
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge("request body too large".to_string());
        }
        ApiError::BadRequest(format!("invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(format!("invalid id: {}", rejection.body_text()))
    }
}

/// Runs `op` against a pooled connection on the blocking thread pool.
///
/// The connection is checked out inside the blocking task and returned to
/// the pool when the task ends, whether `op` succeeds, fails or panics.
pub(crate) async fn with_connection<T, F>(
    state: &Arc<AppState>,
    name: &'static str,
    op: F,
) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut Connection) -> Result<T, ApiError> + Send + 'static,
{
    let pool = state.pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(|e| {
            ApiError::InternalServerError(format!("db connection failed for {name}: {e}"))
        })?;
        op(&mut conn)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("{name} task join error: {e}")))?
}
