//! Row types and their JSON shape.

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub i64);

/// Store-assigned identifier of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerId(pub i64);

macro_rules! sql_id {
    ($ty:ident) => {
        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map($ty)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

sql_id!(QuestionId);
sql_id!(AnswerId);

/// A question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Store-assigned id.
    pub id: QuestionId,
    /// Question title, never empty.
    pub title: String,
    /// Insertion timestamp (ISO 8601, UTC, millisecond precision).
    pub created_at: String,
}

/// An answer to a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// Store-assigned id.
    pub id: AnswerId,
    /// Answer body, never empty.
    pub content: String,
    /// The question this answer belongs to.
    pub question_id: QuestionId,
    /// Insertion timestamp (ISO 8601, UTC, millisecond precision).
    pub created_at: String,
}

/// A question together with its answers, oldest answer first.
///
/// Serializes as the question's own fields plus an `answers` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionWithAnswers {
    #[serde(flatten)]
    pub question: Question,
    pub answers: Vec<Answer>,
}

pub(crate) fn map_row_to_question(row: &Row) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: row.get(2)?,
    })
}

pub(crate) fn map_row_to_answer(row: &Row) -> rusqlite::Result<Answer> {
    Ok(Answer {
        id: row.get(0)?,
        content: row.get(1)?,
        question_id: row.get(2)?,
        created_at: row.get(3)?,
    })
}
