// Copyright (c) 2025 - Cowboy AI, Inc.
//! `Fn::Join` intrinsic

use serde_json::{json, Value};

use super::{resolve, Deferred};
use crate::domain::ValidationError;

/// Join a list of (possibly deferred) items with a separator
///
/// Items are resolved when the join is generated, so they may hold references
/// to blocks that have not generated yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    separator: String,
    items: Vec<Deferred>,
}

impl Join {
    /// Create a join with an empty separator
    pub fn new<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Deferred>,
    {
        Self {
            separator: String::new(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a join from a dynamically shaped value, which must be a sequence
    pub fn try_from_deferred(items: Deferred) -> Result<Self, ValidationError> {
        match items {
            Deferred::List(items) => Ok(Self::new(items)),
            Deferred::Literal(Value::Array(items)) => Ok(Self::new(items)),
            _ => Err(ValidationError::InvalidShape {
                field: "item list",
                reason: "expected a sequence of items".to_string(),
            }),
        }
    }

    /// Use `separator` between items
    pub fn separated_by(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// The join separator
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// The unresolved items
    pub fn items(&self) -> &[Deferred] {
        &self.items
    }

    /// Generate the `Fn::Join` function call markup
    pub fn generate(&self) -> Value {
        let resolved: Vec<Value> = self.items.iter().map(resolve).collect();
        json!({ "Fn::Join": [self.separator, resolved] })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intrinsics::LocalReference;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_join_resolves_items() {
        let join = Join::new([
            Deferred::from("arn:aws:iam::"),
            LocalReference::new("AWS::AccountId").unwrap().into(),
            Deferred::from(":role/"),
            Deferred::from("aws-opsworks-service-role"),
        ]);

        assert_eq!(
            join.generate(),
            json!({
                "Fn::Join": ["", [
                    "arn:aws:iam::",
                    { "Ref": "AWS::AccountId" },
                    ":role/",
                    "aws-opsworks-service-role"
                ]]
            })
        );
    }

    #[test]
    fn test_join_separator() {
        let join = Join::new(["a", "b"]).separated_by(",");
        assert_eq!(join.separator(), ",");
        assert_eq!(join.generate(), json!({ "Fn::Join": [",", ["a", "b"]] }));
    }

    #[test]
    fn test_empty_join() {
        let join = Join::new(Vec::<Deferred>::new());
        assert_eq!(join.generate(), json!({ "Fn::Join": ["", []] }));
    }

    #[test]
    fn test_try_from_deferred() {
        assert!(Join::try_from_deferred(Deferred::list(["a"])).is_ok());
        assert!(Join::try_from_deferred(json!(["a", "b"]).into()).is_ok());
        assert!(Join::try_from_deferred("a,b".into()).is_err());
        assert!(Join::try_from_deferred(Deferred::reference("Vpc").unwrap()).is_err());
    }
}
