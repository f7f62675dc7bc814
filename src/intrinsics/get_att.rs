// Copyright (c) 2025 - Cowboy AI, Inc.
//! `Fn::GetAtt` intrinsic

use serde_json::{json, Value};

use super::{resolve, Deferred};
use crate::domain::ValidationError;

/// Lookup of an attribute (e.g. `DNSName`) on another resource
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeLookup {
    object_key: Box<Deferred>,
    attribute: Box<Deferred>,
}

impl AttributeLookup {
    /// Create a lookup; both the object key and the attribute are required
    pub fn new(
        object_key: impl Into<Deferred>,
        attribute: impl Into<Deferred>,
    ) -> Result<Self, ValidationError> {
        let object_key = object_key.into();
        let attribute = attribute.into();

        if object_key.is_absent() {
            return Err(ValidationError::MissingField("object key"));
        }
        if attribute.is_absent() {
            return Err(ValidationError::MissingField("attribute"));
        }

        Ok(Self {
            object_key: Box::new(object_key),
            attribute: Box::new(attribute),
        })
    }

    /// The resource whose attribute is looked up
    pub fn object_key(&self) -> &Deferred {
        &self.object_key
    }

    pub fn attribute(&self) -> &Deferred {
        &self.attribute
    }

    /// Generate the `Fn::GetAtt` function call markup
    pub fn generate(&self) -> Value {
        json!({
            "Fn::GetAtt": [resolve(&self.object_key), resolve(&self.attribute)]
        })
    }
}
