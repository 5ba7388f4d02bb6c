//! Input checks applied before any write.

use crate::QaError;

/// Checks that `title` has at least one non-whitespace character.
///
/// Returns the title unchanged; it is stored exactly as given.
pub fn validate_title(title: &str) -> Result<&str, QaError> {
    validate_text("question title", title)
}

/// Checks that `content` has at least one non-whitespace character.
///
/// Returns the content unchanged; it is stored exactly as given.
pub fn validate_content(content: &str) -> Result<&str, QaError> {
    validate_text("answer content", content)
}

fn validate_text<'a>(field: &str, value: &'a str) -> Result<&'a str, QaError> {
    if value.trim().is_empty() {
        return Err(QaError::InvalidInput(format!("{field} is required")));
    }
    Ok(value)
}
