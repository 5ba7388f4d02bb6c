//! Question endpoints.

use crate::api::{with_connection, ApiError};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Extension, Json, Path},
    http::StatusCode,
};
use forum_qa::{
    create_question, delete_question, get_question_with_answers, list_questions, validate_title,
    Question, QuestionId, QuestionWithAnswers,
};
use serde::Deserialize;
use std::sync::Arc;

/// Request body for `POST /api/questions`.
#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    /// Question title. Required and non-blank.
    pub title: Option<String>,
}

/// GET /api/questions
pub async fn list_questions_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let questions = with_connection(&state, "list_questions", |conn| {
        Ok(list_questions(conn)?)
    })
    .await?;

    Ok(Json(questions))
}

/// POST /api/questions
///
/// Responds `201 Created` with the stored question.
pub async fn create_question_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Question>), ApiError> {
    let Json(payload) = payload?;
    let title = payload
        .title
        .ok_or_else(|| ApiError::BadRequest("question title is required".to_string()))?;
    validate_title(&title)?;

    let question = with_connection(&state, "create_question", move |conn| {
        Ok(create_question(conn, &title)?)
    })
    .await?;

    tracing::info!(question_id = %question.id, "question created");
    Ok((StatusCode::CREATED, Json(question)))
}

/// GET /api/questions/:id
///
/// Returns the question with an `answers` array, oldest answer first.
pub async fn get_question_handler(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<QuestionWithAnswers>, ApiError> {
    let Path(id) = id?;

    let question = with_connection(&state, "get_question", move |conn| {
        Ok(get_question_with_answers(conn, QuestionId(id))?)
    })
    .await?;

    Ok(Json(question))
}

/// DELETE /api/questions/:id
///
/// Removes the question and every answer under it. Responds
/// `204 No Content`.
pub async fn delete_question_handler(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;

    with_connection(&state, "delete_question", move |conn| {
        Ok(delete_question(conn, QuestionId(id))?)
    })
    .await?;

    tracing::info!(question_id = id, "question deleted");
    Ok(StatusCode::NO_CONTENT)
}
