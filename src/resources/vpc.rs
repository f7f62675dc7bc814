// Copyright (c) 2025 - Cowboy AI, Inc.
//! VPC Block
//!
//! A VPC with an internet gateway attached to it. Subnets reference the
//! `vpc` and `internetGateway` roles.

use serde_json::json;
use std::sync::Arc;

use super::{require, ResourceBlock, ResourceUnit, Resources};
use crate::domain::{TagSet, ValidationError};
use crate::errors::TemplateResult;
use crate::intrinsics::Deferred;

/// Construction options for [`Vpc`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VpcOptions {
    /// CIDR block of the VPC (required)
    pub cidr: Deferred,
    /// Enable DNS resolution within the VPC
    pub enable_dns_support: bool,
    /// Assign DNS host names to instances
    pub enable_dns_host_names: bool,
}

/// VPC, internet gateway and gateway attachment
///
/// Roles: `vpc`, `internetGateway`, `attachGateway`
#[derive(Debug, Clone)]
pub struct Vpc {
    block: ResourceBlock,
    options: VpcOptions,
}

impl Vpc {
    pub fn new(
        base_key: impl Into<String>,
        base_name: impl Into<String>,
        options: VpcOptions,
        tags: Arc<TagSet>,
    ) -> Result<Self, ValidationError> {
        require("cidr", &options.cidr)?;

        let block = ResourceBlock::new(base_key, base_name, tags)?
            .with_role("vpc", "")
            .with_role("internetGateway", "InternetGateway")
            .with_role("attachGateway", "AttachGateway");

        Ok(Self { block, options })
    }

    pub fn options(&self) -> &VpcOptions {
        &self.options
    }
}

impl ResourceUnit for Vpc {
    fn block(&self) -> &ResourceBlock {
        &self.block
    }

    fn generate(&self) -> TemplateResult<Resources> {
        let block = &self.block;

        let mut vpc = json!({
            "Type": "AWS::EC2::VPC",
            "Properties": {
                "CidrBlock": self.options.cidr,
                "EnableDnsHostnames": self.options.enable_dns_host_names,
                "EnableDnsSupport": self.options.enable_dns_support,
                "Tags": [ block.name_tag("") ]
            }
        });
        block.apply_tags(&mut vpc)?;

        let mut internet_gateway = json!({
            "Type": "AWS::EC2::InternetGateway",
            "Properties": {
                "Tags": [ block.name_tag("igw") ]
            }
        });
        block.apply_tags(&mut internet_gateway)?;

        let attach_gateway = json!({
            "Type": "AWS::EC2::VPCGatewayAttachment",
            "Properties": {
                "VpcId": block.local_ref("vpc")?,
                "InternetGatewayId": block.local_ref("internetGateway")?
            }
        });

        let mut resources = Resources::new();
        block.insert(&mut resources, "vpc", vpc)?;
        block.insert(&mut resources, "internetGateway", internet_gateway)?;
        block.insert(&mut resources, "attachGateway", attach_gateway)?;

        Ok(resources)
    }
}
