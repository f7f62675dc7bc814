// Copyright (c) 2025 - Cowboy AI, Inc.
//! OpsWorks Stack Block
//!
//! The service role and default instance profile are named, not referenced,
//! so their ARNs are assembled at deploy time from the account id.

use serde_json::json;
use std::sync::Arc;

use super::{require, ResourceBlock, ResourceUnit, Resources};
use crate::domain::{TagSet, ValidationError};
use crate::errors::TemplateResult;
use crate::intrinsics::{Deferred, Join, LocalReference};

/// Construction options for [`OpsWorksStack`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpsWorksStackOptions {
    pub vpc_id: Deferred,
    pub default_subnet_id: Deferred,
    /// IAM role name the OpsWorks service assumes
    pub service_role: Deferred,
    /// IAM instance profile name assigned to stack instances
    pub default_instance_role: Deferred,
    /// Git URL of custom Chef cookbooks
    pub custom_cookbooks_url: Option<String>,
}

/// OpsWorks stack
///
/// Roles: `stack`
#[derive(Debug, Clone)]
pub struct OpsWorksStack {
    block: ResourceBlock,
    options: OpsWorksStackOptions,
}

impl OpsWorksStack {
    pub fn new(
        base_key: impl Into<String>,
        base_name: impl Into<String>,
        options: OpsWorksStackOptions,
        tags: Arc<TagSet>,
    ) -> Result<Self, ValidationError> {
        require("vpc id", &options.vpc_id)?;
        require("default subnet id", &options.default_subnet_id)?;
        require("service role", &options.service_role)?;
        require("default instance role", &options.default_instance_role)?;

        let block = ResourceBlock::new(base_key, base_name, tags)?.with_role("stack", "");

        Ok(Self { block, options })
    }

    fn account_arn(kind: &str, name: &Deferred) -> Result<Join, ValidationError> {
        Ok(Join::new([
            Deferred::from("arn:aws:iam::"),
            LocalReference::new("AWS::AccountId")?.into(),
            Deferred::from(format!(":{kind}/")),
            name.clone(),
        ]))
    }
}

impl ResourceUnit for OpsWorksStack {
    fn block(&self) -> &ResourceBlock {
        &self.block
    }

    fn generate(&self) -> TemplateResult<Resources> {
        let block = &self.block;
        let options = &self.options;

        let mut stack = json!({
            "Type": "AWS::OpsWorks::Stack",
            "Properties": {
                "Name": block.res_name(""),
                "VpcId": options.vpc_id,
                "DefaultSubnetId": options.default_subnet_id,
                "ConfigurationManager": { "Name": "Chef", "Version": "11.10" },
                "ServiceRoleArn": Self::account_arn("role", &options.service_role)?.generate(),
                "DefaultInstanceProfileArn":
                    Self::account_arn("instance-profile", &options.default_instance_role)?.generate()
            }
        });

        if let Some(url) = &options.custom_cookbooks_url {
            stack["Properties"]["UseCustomCookbooks"] = json!(true);
            stack["Properties"]["CustomCookbooksSource"] = json!({ "Type": "git", "Url": url });
        }

        let mut resources = Resources::new();
        block.insert(&mut resources, "stack", stack)?;

        Ok(resources)
    }
}
