// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stack Outputs
//!
//! An output publishes one value of the deployed stack (a VPC id, a load
//! balancer's DNS name, ...). The value is usually deferred and is resolved
//! when the output is generated.

use serde_json::{json, Map, Value};

use crate::domain::invariants::{validate_non_empty, validate_present};
use crate::domain::ValidationError;
use crate::intrinsics::Deferred;

/// A single named stack output
#[derive(Debug, Clone, PartialEq)]
pub struct OutputBlock {
    name: String,
    description: String,
    value: Deferred,
}

impl OutputBlock {
    /// Create an output
    ///
    /// # Invariants
    /// - `name` and `description` must be non-empty
    /// - `value` must not be `null` or an empty string
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<Deferred>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let description = description.into();
        let value = value.into();

        validate_non_empty("name", &name)?;
        validate_non_empty("description", &description)?;
        if let Deferred::Literal(literal) = &value {
            validate_present("value", literal)?;
        }

        Ok(Self {
            name,
            description,
            value,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> &Deferred {
        &self.value
    }

    /// Generate `{ name: { Description, Value } }` with the value resolved
    pub fn generate(&self) -> Map<String, Value> {
        let mut outputs = Map::new();
        outputs.insert(
            self.name.clone(),
            json!({
                "Description": self.description,
                "Value": self.value
            }),
        );
        outputs
    }
}
