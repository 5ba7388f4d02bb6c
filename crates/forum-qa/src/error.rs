//! Error types for question and answer operations.

/// Errors that can occur during question and answer operations.
#[derive(Debug, thiserror::Error)]
pub enum QaError {
    /// A database operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A required text field was empty or too long.
    #[error("{0}")]
    InvalidInput(String),

    /// No question with the given id exists.
    #[error("question not found: {0}")]
    QuestionNotFound(i64),

    /// No answer with the given id exists.
    #[error("answer not found: {0}")]
    AnswerNotFound(i64),
}
