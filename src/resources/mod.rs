// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Blocks
//!
//! A resource block is one logical infrastructure component (a VPC, a subnet
//! with its route table, a load balancer with its security group, ...) that
//! expands into one or more named template resources.
//!
//! # Role Keys
//!
//! Every block declares, at construction time, the template keys it will
//! occupy. Each key is registered under a logical role name:
//!
//! ```text
//! Subnet "PublicSubnetA"
//!   subnet                  -> PublicSubnetA
//!   routeTable              -> PublicSubnetARouteTable
//!   addInternetTrafficRoute -> PublicSubnetAAddInternetTrafficRoute
//!   attachRouteTable        -> PublicSubnetAAttachRouteTable
//! ```
//!
//! Because keys are known before generation, other blocks can reference them
//! (through [`Deferred`](crate::intrinsics::Deferred) values) in any order.
//! Generation may only emit declared keys; [`ResourceBlock::insert`] is the
//! only way a block writes an entry, and it looks keys up by role.

pub mod ha_nat;
pub mod nat;
pub mod opsworks_instance;
pub mod opsworks_layer;
pub mod opsworks_stack;
pub mod rds;
pub mod sandbox_instance;
pub mod subnet;
pub mod vpc;
pub mod web_elb;

pub use ha_nat::{HaNat, HaNatOptions};
pub use nat::{Nat, NatOptions};
pub use opsworks_instance::{AutoScaling, OpsWorksInstance, OpsWorksInstanceOptions};
pub use opsworks_layer::{OpsWorksNodeLayer, OpsWorksNodeLayerOptions};
pub use opsworks_stack::{OpsWorksStack, OpsWorksStackOptions};
pub use rds::{Rds, RdsOptions};
pub use sandbox_instance::{SandboxInstance, SandboxInstanceOptions};
pub use subnet::{Subnet, SubnetOptions};
pub use vpc::{Vpc, VpcOptions};
pub use web_elb::{WebElb, WebElbOptions};

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::invariants::{validate_non_empty, validate_present};
use crate::domain::{suffixed, TagSet, ValidationError};
use crate::errors::{TemplateError, TemplateResult};
use crate::intrinsics::{Deferred, LocalReference};

/// Resource entries produced by a block: template key -> resource body
pub type Resources = Map<String, Value>;

/// State shared by every resource block: identity, naming, tags and role keys
#[derive(Debug, Clone)]
pub struct ResourceBlock {
    base_key: String,
    base_name: String,
    tags: Arc<TagSet>,
    resource_keys: BTreeMap<String, String>,
}

impl ResourceBlock {
    /// Create a block with no roles declared yet
    ///
    /// # Invariants
    /// - `base_key` must be non-empty
    /// - `base_name` must be non-empty
    pub fn new(
        base_key: impl Into<String>,
        base_name: impl Into<String>,
        tags: Arc<TagSet>,
    ) -> Result<Self, ValidationError> {
        let base_key = base_key.into();
        let base_name = base_name.into();
        validate_non_empty("base key", &base_key)?;
        validate_non_empty("base name", &base_name)?;

        Ok(Self {
            base_key,
            base_name,
            tags,
            resource_keys: BTreeMap::new(),
        })
    }

    /// Declare a role whose key is the base key followed by `suffix`
    pub fn with_role(mut self, role: impl Into<String>, suffix: &str) -> Self {
        self.declare_role(role, suffix);
        self
    }

    /// Declare a role whose key is the base key followed by `suffix`
    pub fn declare_role(&mut self, role: impl Into<String>, suffix: &str) {
        let key = format!("{}{}", self.base_key, suffix);
        self.resource_keys.insert(role.into(), key);
    }

    /// Remove a role the block has decided not to emit
    pub fn withdraw_role(&mut self, role: &str) -> Option<String> {
        self.resource_keys.remove(role)
    }

    /// The key prefix shared by all of this block's resources
    pub fn base_key(&self) -> &str {
        &self.base_key
    }

    /// The display name prefix used for `Name` tags
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// The stack-wide tags
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Declared roles and their keys, ordered by role name
    pub fn roles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.resource_keys
            .iter()
            .map(|(role, key)| (role.as_str(), key.as_str()))
    }

    /// Look up the template key registered for `role`
    pub fn resource_key(&self, role: &str) -> TemplateResult<&str> {
        self.resource_keys
            .get(role)
            .map(String::as_str)
            .ok_or_else(|| TemplateError::UnknownRole {
                base_key: self.base_key.clone(),
                role: role.to_string(),
            })
    }

    /// Resource name built from the base name and an optional suffix
    pub fn res_name(&self, suffix: &str) -> String {
        suffixed(&self.base_name, suffix)
    }

    /// `{ "Key": "Name", "Value": <res_name(suffix)> }`
    pub fn name_tag(&self, suffix: &str) -> Value {
        json!({ "Key": "Name", "Value": self.res_name(suffix) })
    }

    /// Generated `Ref` to one of this block's own roles
    pub fn local_ref(&self, role: &str) -> TemplateResult<Value> {
        Ok(LocalReference::to_value(self.resource_key(role)?)?)
    }

    /// Stamp the stack-wide tags onto a resource body
    pub fn apply_tags(&self, body: &mut Value) -> TemplateResult<()> {
        Ok(self.tags.apply(body)?)
    }

    /// Add a resource body under the key registered for `role`
    pub fn insert(&self, resources: &mut Resources, role: &str, body: Value) -> TemplateResult<()> {
        let key = self.resource_key(role)?;
        resources.insert(key.to_string(), body);
        Ok(())
    }
}

/// Validate that a required option was provided
pub(crate) fn require(field: &'static str, value: &Deferred) -> Result<(), ValidationError> {
    match value {
        Deferred::Literal(literal) => validate_present(field, literal),
        _ => Ok(()),
    }
}

/// Shared capability of every resource block
///
/// Implementors expose their [`ResourceBlock`] and generate their resources.
/// A block that does not implement [`generate`](ResourceUnit::generate) fails
/// with [`TemplateError::NotImplemented`] when assembled.
pub trait ResourceUnit: fmt::Debug {
    /// The block's identity, tags and role keys
    fn block(&self) -> &ResourceBlock;

    /// Look up the template key registered for `role`
    fn resource_key(&self, role: &str) -> TemplateResult<&str> {
        self.block().resource_key(role)
    }

    /// Deferred `Ref` to the resource registered for `role`
    fn reference(&self, role: &str) -> TemplateResult<Deferred> {
        Ok(Deferred::reference(self.resource_key(role)?)?)
    }

    /// Generate the block's resources, keyed by their declared keys
    fn generate(&self) -> TemplateResult<Resources> {
        Err(TemplateError::NotImplemented(
            self.block().base_key().to_string(),
        ))
    }
}
