// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for template assembly

use thiserror::Error;

use crate::domain::ValidationError;

/// Errors that can occur while declaring or assembling a stack template
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A block, intrinsic or tag set was constructed with invalid arguments
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A role key was requested that the block never declared (or withdrew)
    #[error("Specified resource key was not defined by block {base_key}: {role}")]
    UnknownRole { base_key: String, role: String },

    /// A resource block did not provide its own generate() implementation
    #[error("The generate() method has not been implemented for block {0}")]
    NotImplemented(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Topology configuration could not be read
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

impl From<serde_json::Error> for TemplateError {
    fn from(err: serde_json::Error) -> Self {
        TemplateError::Serialization(err.to_string())
    }
}
