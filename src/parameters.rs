// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stack Parameters
//!
//! Parameters are values supplied when the stack is deployed (passwords, key
//! pair names, instance sizes). Resources refer to them with a plain `Ref`
//! on the parameter name:
//!
//! ```rust
//! use cim_stack_template::intrinsics::Deferred;
//! use cim_stack_template::parameters::ParameterBlock;
//!
//! let password = ParameterBlock::new("DbPassword", "String")
//!     .unwrap()
//!     .with_no_echo(true);
//! let value = Deferred::reference(password.name()).unwrap();
//! assert_eq!(value.resolve()["Ref"], "DbPassword");
//! ```

use serde_json::{Map, Value};

use crate::domain::invariants::validate_non_empty;
use crate::domain::ValidationError;

/// A single named stack parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterBlock {
    name: String,
    parameter_type: String,
    description: Option<String>,
    default: Option<Value>,
    allowed_values: Vec<Value>,
    no_echo: bool,
    constraint_description: Option<String>,
}

impl ParameterBlock {
    /// Create a parameter of the given type (`String`, `Number`,
    /// `AWS::EC2::KeyPair::KeyName`, ...)
    pub fn new(
        name: impl Into<String>,
        parameter_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let parameter_type = parameter_type.into();
        validate_non_empty("name", &name)?;
        validate_non_empty("parameter type", &parameter_type)?;

        Ok(Self {
            name,
            parameter_type,
            description: None,
            default: None,
            allowed_values: Vec::new(),
            no_echo: false,
            constraint_description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_allowed_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Mask the value in console and API output
    pub fn with_no_echo(mut self, no_echo: bool) -> Self {
        self.no_echo = no_echo;
        self
    }

    pub fn with_constraint_description(mut self, description: impl Into<String>) -> Self {
        self.constraint_description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generate `{ name: { Type, ... } }`, omitting unset fields
    pub fn generate(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("Type".to_string(), Value::from(self.parameter_type.as_str()));
        if let Some(description) = &self.description {
            body.insert("Description".to_string(), Value::from(description.as_str()));
        }
        if let Some(default) = &self.default {
            body.insert("Default".to_string(), default.clone());
        }
        if !self.allowed_values.is_empty() {
            body.insert(
                "AllowedValues".to_string(),
                Value::Array(self.allowed_values.clone()),
            );
        }
        if self.no_echo {
            body.insert("NoEcho".to_string(), Value::Bool(true));
        }
        if let Some(description) = &self.constraint_description {
            body.insert(
                "ConstraintDescription".to_string(),
                Value::from(description.as_str()),
            );
        }

        let mut parameters = Map::new();
        parameters.insert(self.name.clone(), Value::Object(body));
        parameters
    }
}
