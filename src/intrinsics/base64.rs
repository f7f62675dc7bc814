// Copyright (c) 2025 - Cowboy AI, Inc.
//! `Fn::Base64` intrinsic

use serde_json::{json, Value};

use super::{resolve, Deferred};
use crate::domain::ValidationError;

/// Base64 encoding of a (possibly deferred) value, typically instance user data
#[derive(Debug, Clone, PartialEq)]
pub struct Base64Encode {
    resource: Box<Deferred>,
}

impl Base64Encode {
    /// Create an encoding; the value must be present and non-empty
    pub fn new(resource: impl Into<Deferred>) -> Result<Self, ValidationError> {
        let resource = resource.into();
        if resource.is_absent() {
            return Err(ValidationError::MissingField("resource"));
        }
        Ok(Self {
            resource: Box::new(resource),
        })
    }

    /// The value to be encoded
    pub fn resource(&self) -> &Deferred {
        &self.resource
    }

    /// Generate the `Fn::Base64` function call markup
    pub fn generate(&self) -> Value {
        json!({ "Fn::Base64": resolve(&self.resource) })
    }
}
