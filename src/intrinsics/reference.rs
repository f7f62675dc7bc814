// Copyright (c) 2025 - Cowboy AI, Inc.
//! `Ref` intrinsic

use serde_json::{json, Value};

use crate::domain::invariants::{validate_non_empty, ValidationError};

/// Reference to a resource, parameter or pseudo parameter by key
///
/// # Examples
///
/// ```rust
/// use cim_stack_template::intrinsics::LocalReference;
/// use serde_json::json;
///
/// let vpc = LocalReference::new("Vpc").unwrap();
/// assert_eq!(vpc.generate(), json!({ "Ref": "Vpc" }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalReference {
    key: String,
}

impl LocalReference {
    /// Create a reference; the key must be non-empty
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        validate_non_empty("resource", &key)?;
        Ok(Self { key })
    }

    /// Create and immediately generate a reference
    pub fn to_value(key: impl Into<String>) -> Result<Value, ValidationError> {
        Self::new(key).map(|reference| reference.generate())
    }

    /// The referenced key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Generate the reference lookup object
    pub fn generate(&self) -> Value {
        json!({ "Ref": self.key })
    }
}
