//! Questions and answers for the forum backend.
//!
//! Implements the persistence operations behind the REST API: listing,
//! creating, fetching and deleting questions, and creating and deleting the
//! answers nested under them. Every function takes a borrowed SQLite
//! connection; acquiring and releasing that connection is the caller's job.
//!
//! A question owns its answers. Answers are only created against a question
//! that exists at insertion time, and deleting a question removes its
//! answers in the same statement through the schema's cascade rule.

mod answers;
mod error;
mod model;
mod questions;
mod validation;

pub use answers::{create_answer, delete_answer, get_answer, list_answers};
pub use error::QaError;
pub use model::{Answer, AnswerId, Question, QuestionId, QuestionWithAnswers};
pub use questions::{
    create_question, delete_question, get_question, get_question_with_answers, list_questions,
};
pub use validation::{validate_content, validate_title};
