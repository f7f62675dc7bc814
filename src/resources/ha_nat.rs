// Copyright (c) 2025 - Cowboy AI, Inc.
//! Highly Available NAT Block
//!
//! A NAT instance kept alive by a single-member auto scaling group. The
//! instance runs with an IAM instance profile that allows it to take over the
//! private route tables when it is replaced.

use serde_json::json;
use std::sync::Arc;

use super::{require, ResourceBlock, ResourceUnit, Resources};
use crate::domain::{propagate_at_launch, TagSet, ValidationError};
use crate::errors::TemplateResult;
use crate::intrinsics::{Base64Encode, Deferred, Join};

/// Actions the NAT instance needs to re-point private routes at itself
const ROUTE_TAKEOVER_ACTIONS: [&str; 6] = [
    "ec2:DescribeInstances",
    "ec2:ModifyInstanceAttribute",
    "ec2:DescribeSubnets",
    "ec2:DescribeRouteTables",
    "ec2:CreateRoute",
    "ec2:ReplaceRoute",
];

/// Construction options for [`HaNat`]
#[derive(Debug, Clone, PartialEq)]
pub struct HaNatOptions {
    pub vpc_id: Deferred,
    pub image_id: Deferred,
    pub instance_type: Deferred,
    pub az: Deferred,
    pub public_subnet_id: Deferred,
    /// Boot script lines, joined without a separator
    pub user_data: Vec<Deferred>,
}

impl Default for HaNatOptions {
    fn default() -> Self {
        Self {
            vpc_id: Deferred::default(),
            image_id: Deferred::default(),
            instance_type: Deferred::default(),
            az: Deferred::default(),
            public_subnet_id: Deferred::default(),
            user_data: vec![Deferred::from("echo \"hello world\"")],
        }
    }
}

/// NAT instance, IAM role and profile, security group and auto scaling group
///
/// Roles: `securityGroup`, `iamInstanceRole`, `iamInstanceProfile`,
/// `instance`, `autoScalingGroup`
#[derive(Debug, Clone)]
pub struct HaNat {
    block: ResourceBlock,
    options: HaNatOptions,
}

impl HaNat {
    pub fn new(
        base_key: impl Into<String>,
        base_name: impl Into<String>,
        options: HaNatOptions,
        tags: Arc<TagSet>,
    ) -> Result<Self, ValidationError> {
        require("vpc id", &options.vpc_id)?;
        require("public subnet id", &options.public_subnet_id)?;

        let block = ResourceBlock::new(base_key, base_name, tags)?
            .with_role("securityGroup", "SecurityGroup")
            .with_role("iamInstanceRole", "IamInstanceRole")
            .with_role("iamInstanceProfile", "IamInstanceProfile")
            .with_role("instance", "Instance")
            .with_role("autoScalingGroup", "AutoScalingGroup");

        Ok(Self { block, options })
    }

    fn user_data(&self) -> Result<Base64Encode, ValidationError> {
        Base64Encode::new(Join::new(self.options.user_data.iter().cloned()))
    }
}

impl ResourceUnit for HaNat {
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

        let iam_instance_role = json!({
            "Type": "AWS::IAM::Role",
            "Properties": {
                "AssumeRolePolicyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Effect": "Allow",
                        "Principal": { "Service": [ "ec2.amazonaws.com" ] },
                        "Action": [ "sts:AssumeRole" ]
                    }]
                },
                "Path": "/role/nat-instance/",
                "Policies": [{
                    "PolicyName": block.res_name("route-takeover"),
                    "PolicyDocument": {
                        "Version": "2012-10-17",
                        "Statement": [{
                            "Effect": "Allow",
                            "Action": ROUTE_TAKEOVER_ACTIONS,
                            "Resource": "*"
                        }]
                    }
                }]
            }
        });

        let iam_instance_profile = json!({
            "Type": "AWS::IAM::InstanceProfile",
            "Properties": {
                "Path": "/policy/nat-instance/",
                "Roles": [ block.local_ref("iamInstanceRole")? ]
            }
        });

        let mut instance = json!({
            "Type": "AWS::EC2::Instance",
            "Properties": {
                "ImageId": options.image_id,
                "InstanceType": options.instance_type,
                "IamInstanceProfile": block.local_ref("iamInstanceProfile")?,
                "SourceDestCheck": false,
                "NetworkInterfaces": [{
                    "DeviceIndex": 0,
                    "SubnetId": options.public_subnet_id,
                    "GroupSet": [ block.local_ref("securityGroup")? ],
                    "AssociatePublicIpAddress": true
                }],
                "UserData": self.user_data()?.generate(),
                "Tags": [ block.name_tag("instance") ]
            }
        });
        block.apply_tags(&mut instance)?;

        let mut auto_scaling_group = json!({
            "Type": "AWS::AutoScaling::AutoScalingGroup",
            "DependsOn": [ block.resource_key("instance")? ],
            "Properties": {
                "AvailabilityZones": [ options.az ],
                "VPCZoneIdentifier": [ options.public_subnet_id ],
                "InstanceId": block.local_ref("instance")?,
                "MinSize": 1,
                "MaxSize": 1,
                "DesiredCapacity": 1,
                "Tags": [{
                    "Key": "Name",
                    "Value": block.res_name("auto-scaling-group"),
                    "PropagateAtLaunch": false
                }]
            }
        });
        block.tags().apply_with(&mut auto_scaling_group, propagate_at_launch)?;

        let mut resources = Resources::new();
        block.insert(&mut resources, "securityGroup", security_group)?;
        block.insert(&mut resources, "iamInstanceRole", iam_instance_role)?;
        block.insert(&mut resources, "iamInstanceProfile", iam_instance_profile)?;
        block.insert(&mut resources, "instance", instance)?;
        block.insert(&mut resources, "autoScalingGroup", auto_scaling_group)?;

        Ok(resources)
    }
}
