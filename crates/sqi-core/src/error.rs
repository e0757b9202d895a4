//! Engine error types.
//!
//! Only failures that abort a computation live here. Degenerate aggregates
//! and unknown enum labels are resolved by policy and never surface as errors.

use thiserror::Error;

/// Errors that can occur while reading a payload or scoring its attempts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqiError {
    /// The payload could not be parsed at all.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The payload parsed but does not have the expected shape.
    #[error("invalid schema: {0}")]
    SchemaViolation(String),

    /// An attempt cannot be scored (e.g. non-positive expected time).
    #[error("invalid attempt #{index}: {reason}")]
    InvalidAttempt { index: usize, reason: String },
}

/// Which class of failure an [`SqiError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Malformed,
    Schema,
    Attempt,
}

impl SqiError {
    /// Returns the failure class, so callers can surface distinct messages.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SqiError::MalformedInput(_) => ErrorKind::Malformed,
            SqiError::SchemaViolation(_) => ErrorKind::Schema,
            SqiError::InvalidAttempt { .. } => ErrorKind::Attempt,
        }
    }

    /// Returns `true` if the error was raised before any scoring began.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SqiError::MalformedInput(_) | SqiError::SchemaViolation(_)
        )
    }
}
