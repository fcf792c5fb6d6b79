//! Solver error types.
//!
//! All failures are request-scoped: a failed solve leaves nothing behind
//! that could affect the next request.

use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SolverError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_display() {
        let err = SolverError::invalid_input("no employees provided");
        assert_eq!(err.to_string(), "Invalid input: no employees provided");
    }

    #[test]
    fn test_validation_display_joins_messages() {
        let err = SolverError::Validation(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate employee ID: E1"),
            ValidationError::new(ValidationErrorKind::InvalidDuration, "bad duration"),
        ]);
        assert_eq!(
            err.to_string(),
            "Request validation failed: Duplicate employee ID: E1; bad duration"
        );
    }
}
