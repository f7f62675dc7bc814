// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Construction Invariants
//!
//! Every block, intrinsic function and builder validates its arguments when it
//! is constructed. The checks live here so that they read the same everywhere
//! and produce the same error shapes.
//!
//! All functions are pure: no side effects, deterministic, and they return a
//! detailed [`ValidationError`] instead of panicking.

use serde_json::Value;

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required string argument was empty
    #[error("Invalid {0} specified (must be a non-empty string)")]
    EmptyField(&'static str),

    /// A required value was absent
    #[error("Invalid {0} specified (value is required)")]
    MissingField(&'static str),

    /// A list argument that must contain at least one entry was empty
    #[error("At least one entry must be specified for {0}")]
    EmptyList(&'static str),

    /// A count argument was zero
    #[error("Invalid {0} specified (must be greater than zero)")]
    InvalidCount(&'static str),

    /// An argument had the wrong shape
    #[error("Invalid {field} specified: {reason}")]
    InvalidShape { field: &'static str, reason: String },
}

/// Validate that a string argument is non-empty
pub fn validate_non_empty(field: &'static str, value: &str) -> ValidationResult {
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

/// Validate that a JSON value is present
///
/// # Rules
/// - `null` is treated as absent
/// - An empty string is treated as absent
pub fn validate_present(field: &'static str, value: &Value) -> ValidationResult {
    match value {
        Value::Null => Err(ValidationError::MissingField(field)),
        Value::String(s) if s.is_empty() => Err(ValidationError::MissingField(field)),
        _ => Ok(()),
    }
}

/// Validate that a list argument has at least one entry
pub fn validate_non_empty_list<T>(field: &'static str, items: &[T]) -> ValidationResult {
    if items.is_empty() {
        return Err(ValidationError::EmptyList(field));
    }
    Ok(())
}

/// Validate that a count is greater than zero
pub fn validate_count(field: &'static str, count: usize) -> ValidationResult {
    if count == 0 {
        return Err(ValidationError::InvalidCount(field));
    }
    Ok(())
}
