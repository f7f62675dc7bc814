// Copyright (c) 2025 - Cowboy AI, Inc.
//! Deferred Values and Intrinsic Functions
//!
//! Blocks are wired together before any of them has generated its resources.
//! Instead of concrete values, a block's options hold [`Deferred`] values that
//! point at other blocks' role keys. Role keys are derived from base keys at
//! construction time, so a reference can be built as soon as the referenced
//! block exists.
//!
//! # Resolution
//!
//! ```text
//! Deferred ──resolve()──> serde_json::Value
//!
//! Literal(v)        ─> v
//! List([a, b])      ─> [resolve(a), resolve(b)]
//! Ref(key)          ─> { "Ref": key }
//! Join(items, sep)  ─> { "Fn::Join": [sep, [resolve(items)...]] }
//! Base64(x)         ─> { "Fn::Base64": resolve(x) }
//! GetAtt(k, a)      ─> { "Fn::GetAtt": [resolve(k), resolve(a)] }
//! ```
//!
//! [`resolve`] is total: its output is plain JSON and cannot hold an
//! unresolved [`Deferred`], however deeply the input nests.
//!
//! # Example
//!
//! ```rust
//! use cim_stack_template::intrinsics::{resolve, Deferred, Join, LocalReference};
//! use serde_json::json;
//!
//! let account = LocalReference::new("AWS::AccountId").unwrap();
//! let arn = Join::new(["arn:aws:iam::".into(), Deferred::from(account), ":root".into()]);
//!
//! assert_eq!(
//!     resolve(&arn.into()),
//!     json!({ "Fn::Join": ["", ["arn:aws:iam::", { "Ref": "AWS::AccountId" }, ":root"]] })
//! );
//! ```

pub mod base64;
pub mod get_att;
pub mod join;
pub mod reference;

pub use base64::Base64Encode;
pub use get_att::AttributeLookup;
pub use join::Join;
pub use reference::LocalReference;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::domain::ValidationError;

/// A value whose template representation is produced at generation time
#[derive(Debug, Clone, PartialEq)]
pub enum Deferred {
    /// Plain JSON, resolved to itself
    Literal(Value),
    /// Ordered sequence, resolved element-wise
    List(Vec<Deferred>),
    /// `{ "Ref": key }`
    Ref(LocalReference),
    /// `{ "Fn::Join": [separator, items] }`
    Join(Join),
    /// `{ "Fn::Base64": resource }`
    Base64(Base64Encode),
    /// `{ "Fn::GetAtt": [object_key, attribute] }`
    GetAtt(AttributeLookup),
}

/// Resolve a deferred value (and everything nested in it) into plain JSON
pub fn resolve(value: &Deferred) -> Value {
    match value {
        Deferred::Literal(literal) => literal.clone(),
        Deferred::List(items) => Value::Array(items.iter().map(resolve).collect()),
        Deferred::Ref(reference) => reference.generate(),
        Deferred::Join(join) => join.generate(),
        Deferred::Base64(encode) => encode.generate(),
        Deferred::GetAtt(lookup) => lookup.generate(),
    }
}

impl Deferred {
    /// Build a reference to a role key or template parameter
    pub fn reference(key: impl Into<String>) -> Result<Self, ValidationError> {
        LocalReference::new(key).map(Self::Ref)
    }

    /// Build a list from anything convertible into deferred values
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Deferred>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Resolve this value into plain JSON
    pub fn resolve(&self) -> Value {
        resolve(self)
    }

    /// A literal `null` or empty string, i.e. a value that was never provided
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Literal(Value::Null) => true,
            Self::Literal(Value::String(s)) => s.is_empty(),
            _ => false,
        }
    }

    /// Borrow the literal string, if this is one
    pub fn as_literal_str(&self) -> Option<&str> {
        match self {
            Self::Literal(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl Default for Deferred {
    fn default() -> Self {
        Self::Literal(Value::Null)
    }
}

/// Deferred values serialize as their resolved form, so they can be embedded
/// directly in `serde_json::json!` resource bodies.
impl Serialize for Deferred {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        resolve(self).serialize(serializer)
    }
}

macro_rules! literal_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Deferred {
                fn from(value: $ty) -> Self {
                    Self::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_from!(&str, String, bool, i32, i64, u16, u32, u64, f64);

impl From<&String> for Deferred {
    fn from(value: &String) -> Self {
        Self::Literal(Value::String(value.clone()))
    }
}

impl From<Value> for Deferred {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<Vec<Deferred>> for Deferred {
    fn from(items: Vec<Deferred>) -> Self {
        Self::List(items)
    }
}

impl From<LocalReference> for Deferred {
    fn from(reference: LocalReference) -> Self {
        Self::Ref(reference)
    }
}

impl From<Join> for Deferred {
    fn from(join: Join) -> Self {
        Self::Join(join)
    }
}

impl From<Base64Encode> for Deferred {
    fn from(encode: Base64Encode) -> Self {
        Self::Base64(encode)
    }
}

impl From<AttributeLookup> for Deferred {
    fn from(lookup: AttributeLookup) -> Self {
        Self::GetAtt(lookup)
    }
}
