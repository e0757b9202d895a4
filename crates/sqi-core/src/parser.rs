//! Attempt payload parser.
//!
//! Reads `{ "student_id": ..., "attempts": [...] }` documents and validates
//! them. Shape errors are reported before any scoring begins.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::SqiError;
use crate::model::{Attempt, SqiInput};

/// Parse a JSON payload into an [`SqiInput`].
pub fn parse_payload(content: &str) -> Result<SqiInput, SqiError> {
    if content.trim().is_empty() {
        return Err(SqiError::MalformedInput(
            "no student attempt data supplied".into(),
        ));
    }

    let value: Value =
        serde_json::from_str(content).map_err(|e| SqiError::MalformedInput(e.to_string()))?;

    let Value::Object(mut object) = value else {
        return Err(SqiError::SchemaViolation(
            "payload must be a JSON object with 'student_id' and 'attempts'".into(),
        ));
    };

    let student_id = match object.remove("student_id") {
        Some(Value::String(id)) if !id.trim().is_empty() => id,
        Some(Value::String(_)) => {
            return Err(SqiError::SchemaViolation("'student_id' is empty".into()))
        }
        Some(_) => {
            return Err(SqiError::SchemaViolation(
                "'student_id' must be a string".into(),
            ))
        }
        None => return Err(SqiError::SchemaViolation("missing 'student_id'".into())),
    };

    let raw_attempts = match object.remove("attempts") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(SqiError::SchemaViolation(
                "'attempts' must be an array".into(),
            ))
        }
        None => return Err(SqiError::SchemaViolation("missing 'attempts' array".into())),
    };

    let attempts = raw_attempts
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Attempt>(item)
                .map_err(|e| SqiError::SchemaViolation(format!("attempt #{index}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SqiInput {
        student_id,
        attempts,
    })
}

/// Read and parse a payload file.
pub fn load_payload(path: &Path) -> Result<SqiInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;
    let input = parse_payload(&content)
        .with_context(|| format!("failed to load payload: {}", path.display()))?;
    Ok(input)
}

/// A non-fatal issue found in a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// Zero-based attempt index (if applicable).
    pub attempt: Option<usize>,
    pub message: String,
}

impl ValidationWarning {
    fn at(index: usize, message: impl Into<String>) -> Self {
        Self {
            attempt: Some(index),
            message: message.into(),
        }
    }
}

/// Check a parsed payload for values the engine will treat by policy or
/// reject while scoring.
pub fn validate_input(input: &SqiInput) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if input.attempts.is_empty() {
        warnings.push(ValidationWarning {
            attempt: None,
            message: "no attempts; every index will be 0".into(),
        });
    }

    for (i, a) in input.attempts.iter().enumerate() {
        if !(a.expected_time_sec.is_finite() && a.expected_time_sec > 0.0) {
            warnings.push(ValidationWarning::at(
                i,
                format!(
                    "expected_time_sec must be > 0 (got {}); scoring will fail",
                    a.expected_time_sec
                ),
            ));
        }
        if a.marks < 0.0 {
            warnings.push(ValidationWarning::at(i, "marks is negative"));
        }
        if a.neg_marks < 0.0 {
            warnings.push(ValidationWarning::at(i, "neg_marks is negative"));
        }
        if a.time_spent_sec < 0.0 {
            warnings.push(ValidationWarning::at(i, "time_spent_sec is negative"));
        }
        if !a.importance.is_known() {
            warnings.push(ValidationWarning::at(
                i,
                format!("unknown importance '{}', weighted as 1.0", a.importance),
            ));
        }
        if !a.difficulty.is_known() {
            warnings.push(ValidationWarning::at(
                i,
                format!("unknown difficulty '{}', weighted as 1.0", a.difficulty),
            ));
        }
        if !a.kind.is_known() {
            warnings.push(ValidationWarning::at(
                i,
                format!("unknown type '{}', weighted as 1.0", a.kind),
            ));
        }
    }

    warnings
}
