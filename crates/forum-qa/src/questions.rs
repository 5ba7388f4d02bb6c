//! Question operations.

use rusqlite::{Connection, OptionalExtension};

use crate::answers::list_answers;
use crate::model::{map_row_to_question, Question, QuestionId, QuestionWithAnswers};
use crate::validation::validate_title;
use crate::QaError;

/// Lists every question, newest first.
///
/// Questions created within the same millisecond keep creation order through
/// the id tie-break.
pub fn list_questions(conn: &Connection) -> Result<Vec<Question>, QaError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, created_at
         FROM questions
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map([], map_row_to_question)?;
    let mut questions = Vec::new();
    for row in rows {
        questions.push(row?);
    }
    Ok(questions)
}

/// Creates a question and returns the stored row.
///
/// The title is stored exactly as given. The returned record carries the
/// store-assigned `id` and `created_at`.
///
/// # Errors
///
/// Returns `QaError::InvalidInput` without touching the database if the
/// title is blank.
pub fn create_question(conn: &Connection, title: &str) -> Result<Question, QaError> {
    let title = validate_title(title)?;

    let question = conn.query_row(
        "INSERT INTO questions (title) VALUES (?1)
         RETURNING id, title, created_at",
        [title],
        map_row_to_question,
    )?;

    tracing::debug!(question_id = %question.id, "question created");
    Ok(question)
}

/// Retrieves a question by id.
pub fn get_question(conn: &Connection, id: QuestionId) -> Result<Question, QaError> {
    conn.query_row(
        "SELECT id, title, created_at FROM questions WHERE id = ?1",
        [id],
        map_row_to_question,
    )
    .optional()?
    .ok_or(QaError::QuestionNotFound(id.0))
}

/// Retrieves a question and all of its answers, oldest answer first.
///
/// Both reads run in one transaction so the answers always belong to the
/// question as it was read.
pub fn get_question_with_answers(
    conn: &Connection,
    id: QuestionId,
) -> Result<QuestionWithAnswers, QaError> {
    let tx = conn.unchecked_transaction()?;
    let question = get_question(&tx, id)?;
    let answers = list_answers(&tx, id)?;
    tx.commit()?;

    Ok(QuestionWithAnswers { question, answers })
}

/// Deletes a question and, through the cascade rule, all of its answers.
///
/// # Errors
///
/// Returns `QaError::QuestionNotFound` if no row matched.
pub fn delete_question(conn: &Connection, id: QuestionId) -> Result<(), QaError> {
    let count = conn.execute("DELETE FROM questions WHERE id = ?1", [id])?;
    if count == 0 {
        return Err(QaError::QuestionNotFound(id.0));
    }
    tracing::debug!(question_id = %id, "question deleted");
    Ok(())
}
