// Copyright (c) 2025 - Cowboy AI, Inc.
//! RDS Block
//!
//! A multi-AZ MySQL instance placed in a subnet group spanning the given
//! (usually private) subnets, with a security group opening port 3306.

use serde_json::json;
use std::sync::Arc;

use super::{require, ResourceBlock, ResourceUnit, Resources};
use crate::domain::invariants::validate_non_empty_list;
use crate::domain::{TagSet, ValidationError};
use crate::errors::TemplateResult;
use crate::intrinsics::Deferred;

/// Construction options for [`Rds`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RdsOptions {
    pub vpc_id: Deferred,
    /// Subnets of the DB subnet group (must not be empty)
    pub subnet_ids: Vec<Deferred>,
    /// Database name; the master user name is used when unset
    pub db_name: Option<Deferred>,
    pub db_user_name: Deferred,
    pub db_password: Deferred,
    /// DB instance class, e.g. `db.t2.small`
    pub instance_type: Deferred,
    /// Allocated storage in GiB
    pub storage: Deferred,
}

/// DB instance, security group and subnet group
///
/// Roles: `db`, `securityGroup`, `subnetGroup`
#[derive(Debug, Clone)]
pub struct Rds {
    block: ResourceBlock,
    options: RdsOptions,
}

impl Rds {
    pub fn new(
        base_key: impl Into<String>,
        base_name: impl Into<String>,
        options: RdsOptions,
        tags: Arc<TagSet>,
    ) -> Result<Self, ValidationError> {
        require("vpc id", &options.vpc_id)?;
        validate_non_empty_list("subnet ids", &options.subnet_ids)?;
        require("db user name", &options.db_user_name)?;
        require("db password", &options.db_password)?;
        require("instance type", &options.instance_type)?;
        require("storage", &options.storage)?;

        let block = ResourceBlock::new(base_key, base_name, tags)?
            .with_role("db", "DBInstance")
            .with_role("securityGroup", "DBSecurityGroup")
            .with_role("subnetGroup", "DBSubnetGroup");

        Ok(Self { block, options })
    }
}

impl ResourceUnit for Rds {
    fn block(&self) -> &ResourceBlock {
        &self.block
    }

    fn generate(&self) -> TemplateResult<Resources> {
        let block = &self.block;
        let options = &self.options;

        let mut security_group = json!({
            "Type": "AWS::EC2::SecurityGroup",
            "Properties": {
                "GroupDescription": "Enable SQL database access on port 3306",
                "VpcId": options.vpc_id,
                "SecurityGroupIngress": [{
                    "IpProtocol": "tcp",
                    "FromPort": "3306",
                    "ToPort": "3306",
                    "CidrIp": "0.0.0.0/0"
                }],
                "Tags": [ block.name_tag("security-group") ]
            }
        });
        block.apply_tags(&mut security_group)?;

        let mut subnet_group = json!({
            "Type": "AWS::RDS::DBSubnetGroup",
            "Properties": {
                "DBSubnetGroupDescription": format!("RDS Subnet Group for {}", block.base_key()),
                "SubnetIds": options.subnet_ids
            }
        });
        block.apply_tags(&mut subnet_group)?;

        let mut db = json!({
            "Type": "AWS::RDS::DBInstance",
            "Properties": {
                "DBName": options.db_name.as_ref().unwrap_or(&options.db_user_name),
                "Engine": "MySQL",
                "MasterUsername": options.db_user_name,
                "DBInstanceClass": options.instance_type,
                "VPCSecurityGroups": [ block.local_ref("securityGroup")? ],
                "AllocatedStorage": options.storage,
                "MasterUserPassword": options.db_password,
                "DBSubnetGroupName": block.local_ref("subnetGroup")?,
                "MultiAZ": true
            }
        });
        block.apply_tags(&mut db)?;

        let mut resources = Resources::new();
        block.insert(&mut resources, "securityGroup", security_group)?;
        block.insert(&mut resources, "subnetGroup", subnet_group)?;
        block.insert(&mut resources, "db", db)?;

        Ok(resources)
    }
}
