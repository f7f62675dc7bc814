// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stack-wide Resource Tags
//!
//! A [`TagSet`] holds the key/value pairs that every tagged resource in a stack
//! carries (project, environment, team, ...). One tag set is shared across all
//! blocks of a deployment; blocks only ever read it.
//!
//! # Accumulation
//!
//! Applying a tag set appends to the resource's existing `Tags` list. Applying
//! the same set twice yields duplicate entries; nothing is deduplicated.
//!
//! ```rust
//! use cim_stack_template::domain::TagSet;
//! use serde_json::json;
//!
//! let tags = TagSet::new([("project", "witchcraft")]);
//! let mut vpc = json!({ "Type": "AWS::EC2::VPC" });
//! tags.apply(&mut vpc).unwrap();
//! assert_eq!(vpc["Properties"]["Tags"][0]["Value"], "witchcraft");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::invariants::{ValidationError, ValidationResult};

/// Ordered collection of tags applied to resource bodies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: Map<String, Value>,
}

/// Default tag transform: `{ "Key": key, "Value": value }`
pub fn key_value(key: &str, value: &Value) -> Value {
    json!({ "Key": key, "Value": value })
}

/// Tag transform for auto scaling groups, which copy tags onto launched instances
pub fn propagate_at_launch(key: &str, value: &Value) -> Value {
    json!({ "Key": key, "Value": value, "PropagateAtLaunch": true })
}

impl TagSet {
    /// Create a tag set from key/value pairs, preserving iteration order
    pub fn new<I, K, V>(tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Number of tags in the set
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if the set holds no tags
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Look up a single tag value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.tags.get(key)
    }

    /// Iterate over tags in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.tags.iter()
    }

    /// Append every tag to `resource.Properties.Tags` using the default transform
    pub fn apply(&self, resource: &mut Value) -> ValidationResult {
        self.apply_with(resource, key_value)
    }

    /// Append every tag to `resource.Properties.Tags` using `transform`
    ///
    /// Missing (or null) `Properties` and `Tags` containers are created.
    pub fn apply_with<F>(&self, resource: &mut Value, transform: F) -> ValidationResult
    where
        F: Fn(&str, &Value) -> Value,
    {
        let body = resource
            .as_object_mut()
            .ok_or_else(|| shape_error("resource", "expected a JSON object"))?;

        let properties = body.entry("Properties").or_insert(Value::Null);
        if properties.is_null() {
            *properties = Value::Object(Map::new());
        }
        let properties = properties
            .as_object_mut()
            .ok_or_else(|| shape_error("resource properties", "expected a JSON object"))?;

        let tag_list = properties.entry("Tags").or_insert(Value::Null);
        if tag_list.is_null() {
            *tag_list = Value::Array(Vec::new());
        }
        let tag_list = tag_list
            .as_array_mut()
            .ok_or_else(|| shape_error("resource tags", "expected a JSON array"))?;

        tag_list.extend(self.tags.iter().map(|(key, value)| transform(key, value)));
        Ok(())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

fn shape_error(field: &'static str, reason: &str) -> ValidationError {
    ValidationError::InvalidShape {
        field,
        reason: reason.to_string(),
    }
}
