//! Answer endpoints.

use crate::api::{with_connection, ApiError};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Extension, Json, Path},
    http::StatusCode,
};
use forum_qa::{create_answer, delete_answer, validate_content, Answer, AnswerId, QuestionId};
use serde::Deserialize;
use std::sync::Arc;

/// Request body for `POST /api/questions/:id/answers`.
#[derive(Debug, Deserialize)]
pub struct CreateAnswerRequest {
    pub content: Option<String>,
}

/// POST /api/questions/:id/answers
pub async fn create_answer_handler(
    Extension(state): Extension<Arc<AppState>>,
    question_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateAnswerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Answer>), ApiError> {
    let Path(question_id) = question_id?;
    let Json(payload) = payload?;
    let content = payload
        .content
        .ok_or_else(|| ApiError::BadRequest("answer content is required".to_string()))?;
    validate_content(&content)?;

    let answer = with_connection(&state, "create_answer", move |conn| {
        Ok(create_answer(conn, QuestionId(question_id), &content)?)
    })
    .await?;

    tracing::info!(answer_id = %answer.id, question_id, "answer created");
    Ok((StatusCode::CREATED, Json(answer)))
}

/// DELETE /api/answers/:id
pub async fn delete_answer_handler(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;

    with_connection(&state, "delete_answer", move |conn| {
        Ok(delete_answer(conn, AnswerId(id))?)
    })
    .await?;

    tracing::info!(answer_id = id, "answer deleted");
    Ok(StatusCode::NO_CONTENT)
}
