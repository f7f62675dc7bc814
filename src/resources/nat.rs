// Copyright (c) 2025 - Cowboy AI, Inc.
//! NAT Instance Block
//!
//! A single NAT instance in a public subnet, its own security group, and the
//! default route that sends a private subnet's outbound traffic through it.

use serde_json::json;
use std::sync::Arc;

use super::{require, ResourceBlock, ResourceUnit, Resources};
use crate::domain::{TagSet, ValidationError};
use crate::errors::TemplateResult;
use crate::intrinsics::Deferred;

/// Construction options for [`Nat`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NatOptions {
    pub vpc_id: Deferred,
    pub image_id: Deferred,
    pub instance_type: Deferred,
    /// Subnet the instance is launched into
    pub public_subnet_id: Deferred,
    /// Route table that receives the `0.0.0.0/0` route through the instance
    pub private_subnet_route_table_id: Deferred,
}

/// NAT instance with security group and private route
///
/// Roles: `instance`, `securityGroup`, `addNatTrafficRoute`
#[derive(Debug, Clone)]
pub struct Nat {
    block: ResourceBlock,
    options: NatOptions,
}

impl Nat {
    pub fn new(
        base_key: impl Into<String>,
        base_name: impl Into<String>,
        options: NatOptions,
        tags: Arc<TagSet>,
    ) -> Result<Self, ValidationError> {
        require("vpc id", &options.vpc_id)?;
        require("public subnet id", &options.public_subnet_id)?;
        require("private subnet route table id", &options.private_subnet_route_table_id)?;

        let block = ResourceBlock::new(base_key, base_name, tags)?
            .with_role("instance", "Instance")
            .with_role("securityGroup", "SecurityGroup")
            .with_role("addNatTrafficRoute", "AddNatTrafficRoute");

        Ok(Self { block, options })
    }
}

impl ResourceUnit for Nat {
    fn block(&self) -> &ResourceBlock {
        &self.block
    }

    fn generate(&self) -> TemplateResult<Resources> {
        let block = &self.block;
        let options = &self.options;

        let mut security_group = json!({
            "Type": "AWS::EC2::SecurityGroup",
            "Properties": {
                "GroupDescription": "Security rules for NAT instances",
                "VpcId": options.vpc_id,
                "SecurityGroupIngress": [
                    { "IpProtocol": "tcp", "FromPort": "80", "ToPort": "80", "CidrIp": "0.0.0.0/0" },
                    { "IpProtocol": "tcp", "FromPort": "443", "ToPort": "443", "CidrIp": "0.0.0.0/0" }
                ],
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
                "SourceDestCheck": false,
                "NetworkInterfaces": [{
                    "DeviceIndex": 0,
                    "SubnetId": options.public_subnet_id,
                    "GroupSet": [ block.local_ref("securityGroup")? ],
                    "AssociatePublicIpAddress": true
                }],
                "Tags": [ block.name_tag("instance") ]
            }
        });
        block.apply_tags(&mut instance)?;

        let add_nat_traffic_route = json!({
            "Type": "AWS::EC2::Route",
            "DependsOn": block.resource_key("instance")?,
            "Properties": {
                "RouteTableId": options.private_subnet_route_table_id,
                "DestinationCidrBlock": "0.0.0.0/0",
                "InstanceId": block.local_ref("instance")?
            }
        });

        let mut resources = Resources::new();
        block.insert(&mut resources, "securityGroup", security_group)?;
        block.insert(&mut resources, "instance", instance)?;
        block.insert(&mut resources, "addNatTrafficRoute", add_nat_traffic_route)?;

        Ok(resources)
    }
}
