//! Answer operations.

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::model::{map_row_to_answer, Answer, AnswerId, QuestionId};
use crate::validation::validate_content;
use crate::QaError;

/// Lists the answers of a question, oldest first.
///
/// Returns an empty list for a question without answers, and also for a
/// question id that does not exist.
pub fn list_answers(conn: &Connection, question_id: QuestionId) -> Result<Vec<Answer>, QaError> {
    let mut stmt = conn.prepare(
        "SELECT id, content, question_id, created_at
         FROM answers
         WHERE question_id = ?1
         ORDER BY created_at ASC, id ASC",
    )?;

    let rows = stmt.query_map([question_id], map_row_to_answer)?;
    let mut answers = Vec::new();
    for row in rows {
        answers.push(row?);
    }
    Ok(answers)
}

/// Retrieves an answer by id.
pub fn get_answer(conn: &Connection, id: AnswerId) -> Result<Answer, QaError> {
    conn.query_row(
        "SELECT id, content, question_id, created_at FROM answers WHERE id = ?1",
        [id],
        map_row_to_answer,
    )
    .optional()?
    .ok_or(QaError::AnswerNotFound(id.0))
}

/// Creates an answer under an existing question and returns the stored row.
///
/// The parent lookup and the insert share one `BEGIN IMMEDIATE` transaction.
/// The write lock is held from the lookup onwards, so the question cannot be
/// deleted between the check and the insert.
///
/// # Errors
///
/// Returns `QaError::InvalidInput` if the content is blank, and
/// `QaError::QuestionNotFound` if the question does not exist. Neither case
/// inserts a row.
pub fn create_answer(
    conn: &mut Connection,
    question_id: QuestionId,
    content: &str,
) -> Result<Answer, QaError> {
    let content = validate_content(content)?;

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let exists: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM questions WHERE id = ?1)",
        [question_id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(QaError::QuestionNotFound(question_id.0));
    }

    let answer = tx
        .query_row(
            "INSERT INTO answers (question_id, content) VALUES (?1, ?2)
             RETURNING id, content, question_id, created_at",
            params![question_id, content],
            map_row_to_answer,
        )
        .map_err(|e| match e {
            // The foreign key is the backstop if the parent vanished anyway.
            rusqlite::Error::SqliteFailure(ref err, _)
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                QaError::QuestionNotFound(question_id.0)
            }
            e => QaError::Database(e),
        })?;
    tx.commit()?;

    tracing::debug!(answer_id = %answer.id, question_id = %question_id, "answer created");
    Ok(answer)
}

/// Deletes a single answer.
///
/// # Errors
///
/// Returns `QaError::AnswerNotFound` if no row matched.
pub fn delete_answer(conn: &Connection, id: AnswerId) -> Result<(), QaError> {
    let count = conn.execute("DELETE FROM answers WHERE id = ?1", [id])?;
    if count == 0 {
        return Err(QaError::AnswerNotFound(id.0));
    }
    tracing::debug!(answer_id = %id, "answer deleted");
    Ok(())
}
