// Copyright (c) 2025 - Cowboy AI, Inc.
//! Sandbox Instance Block
//!
//! A standalone EC2 instance for experiments, reachable over SSH, HTTP and
//! HTTPS through its own security group.

use serde_json::json;
use std::sync::Arc;

use super::{require, ResourceBlock, ResourceUnit, Resources};
use crate::domain::{TagSet, ValidationError};
use crate::errors::TemplateResult;
use crate::intrinsics::Deferred;

const OPEN_PORTS: [u16; 3] = [22, 80, 443];

/// Construction options for [`SandboxInstance`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SandboxInstanceOptions {
    pub vpc_id: Deferred,
    pub subnet_id: Deferred,
    pub image_id: Deferred,
    pub instance_type: Deferred,
    /// Associate a public IP address with the instance
    pub is_public: bool,
    /// Key pair for SSH access; `KeyName` is omitted when unset
    pub ssh_key_name: Option<Deferred>,
}

/// Instance and security group
///
/// Roles: `instance`, `securityGroup`
#[derive(Debug, Clone)]
pub struct SandboxInstance {
    block: ResourceBlock,
    options: SandboxInstanceOptions,
}

impl SandboxInstance {
    pub fn new(
        base_key: impl Into<String>,
        base_name: impl Into<String>,
        options: SandboxInstanceOptions,
        tags: Arc<TagSet>,
    ) -> Result<Self, ValidationError> {
        require("vpc id", &options.vpc_id)?;
        require("subnet id", &options.subnet_id)?;
        require("image id", &options.image_id)?;
        require("instance type", &options.instance_type)?;

        let block = ResourceBlock::new(base_key, base_name, tags)?
            .with_role("instance", "Instance")
            .with_role("securityGroup", "SecurityGroup");

        Ok(Self { block, options })
    }
}

impl ResourceUnit for SandboxInstance {
    fn block(&self) -> &ResourceBlock {
        &self.block
    }

    fn generate(&self) -> TemplateResult<Resources> {
        let block = &self.block;
        let options = &self.options;

        let ingress: Vec<_> = OPEN_PORTS
            .iter()
            .map(|port| {
                json!({
                    "IpProtocol": "tcp",
                    "FromPort": port.to_string(),
                    "ToPort": port.to_string(),
                    "CidrIp": "0.0.0.0/0"
                })
            })
            .collect();

        let mut security_group = json!({
            "Type": "AWS::EC2::SecurityGroup",
            "Properties": {
                "GroupDescription": "Security rules for sandbox instances",
                "VpcId": options.vpc_id,
                "SecurityGroupIngress": ingress,
                "SecurityGroupEgress": [],
                "Tags": [ block.name_tag("security-group") ]
            }
        });
        block.apply_tags(&mut security_group)?;

        let mut instance = json!({
            "Type": "AWS::EC2::Instance",
            "Properties": {
                "ImageId": options.image_id,
                "InstanceType": options.instance_type,
                "NetworkInterfaces": [{
                    "DeviceIndex": 0,
                    "SubnetId": options.subnet_id,
                    "GroupSet": [ block.local_ref("securityGroup")? ],
                    "AssociatePublicIpAddress": options.is_public
                }]
            }
        });
        if let Some(key_name) = &options.ssh_key_name {
            instance["Properties"]["KeyName"] = key_name.resolve();
        }
        instance["Properties"]["Tags"] = json!([ block.name_tag("instance") ]);
        block.apply_tags(&mut instance)?;

        let mut resources = Resources::new();
        block.insert(&mut resources, "securityGroup", security_group)?;
        block.insert(&mut resources, "instance", instance)?;

        Ok(resources)
    }
}
