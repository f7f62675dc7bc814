// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subnet Block
//!
//! A subnet with its own route table. Public subnets also get a default route
//! to the VPC's internet gateway; private subnets do not, and withdraw that
//! role at construction so that nothing can reference a route that will never
//! be generated.

use serde_json::json;
use std::sync::Arc;

use super::{require, ResourceBlock, ResourceUnit, Resources};
use crate::domain::{TagSet, ValidationError};
use crate::errors::TemplateResult;
use crate::intrinsics::Deferred;

/// Construction options for [`Subnet`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubnetOptions {
    /// Private subnets get no internet route
    pub is_private: bool,
    /// CIDR block of the subnet (required)
    pub cidr: Deferred,
    /// Availability zone
    pub az: Deferred,
    /// Owning VPC (required)
    pub vpc_id: Deferred,
    /// Internet gateway for the default route (required for public subnets)
    pub internet_gateway_id: Option<Deferred>,
}

/// Subnet, route table, route table association and (public only) internet route
///
/// Roles: `subnet`, `routeTable`, `addInternetTrafficRoute` (public only),
/// `attachRouteTable`
#[derive(Debug, Clone)]
pub struct Subnet {
    block: ResourceBlock,
    options: SubnetOptions,
}

impl Subnet {
    pub fn new(
        base_key: impl Into<String>,
        base_name: impl Into<String>,
        options: SubnetOptions,
        tags: Arc<TagSet>,
    ) -> Result<Self, ValidationError> {
        require("cidr", &options.cidr)?;
        require("vpc id", &options.vpc_id)?;

        let mut block = ResourceBlock::new(base_key, base_name, tags)?
            .with_role("subnet", "")
            .with_role("routeTable", "RouteTable")
            .with_role("addInternetTrafficRoute", "AddInternetTrafficRoute")
            .with_role("attachRouteTable", "AttachRouteTable");

        if options.is_private {
            block.withdraw_role("addInternetTrafficRoute");
        } else {
            match &options.internet_gateway_id {
                Some(gateway) => require("internet gateway id", gateway)?,
                None => return Err(ValidationError::MissingField("internet gateway id")),
            }
        }

        Ok(Self { block, options })
    }

    pub fn options(&self) -> &SubnetOptions {
        &self.options
    }

    pub fn is_private(&self) -> bool {
        self.options.is_private
    }
}

impl ResourceUnit for Subnet {
    fn block(&self) -> &ResourceBlock {
        &self.block
    }

    fn generate(&self) -> TemplateResult<Resources> {
        let block = &self.block;
        let options = &self.options;

        let mut route_table = json!({
            "Type": "AWS::EC2::RouteTable",
            "Properties": {
                "VpcId": options.vpc_id,
                "Tags": [ block.name_tag("route-table") ]
            }
        });
        block.apply_tags(&mut route_table)?;

        let mut subnet = json!({
            "Type": "AWS::EC2::Subnet",
            "Properties": {
                "VpcId": options.vpc_id,
                "CidrBlock": options.cidr,
                "AvailabilityZone": options.az,
                "Tags": [
                    block.name_tag(""),
                    { "Key": "network", "Value": if options.is_private { "private" } else { "public" } }
                ]
            }
        });
        block.apply_tags(&mut subnet)?;

        let attach_route_table = json!({
            "Type": "AWS::EC2::SubnetRouteTableAssociation",
            "Properties": {
                "SubnetId": block.local_ref("subnet")?,
                "RouteTableId": block.local_ref("routeTable")?
            }
        });

        let mut resources = Resources::new();
        block.insert(&mut resources, "subnet", subnet)?;
        if !options.is_private {
            let add_internet_traffic_route = json!({
                "Type": "AWS::EC2::Route",
                "Properties": {
                    "RouteTableId": block.local_ref("routeTable")?,
                    "DestinationCidrBlock": "0.0.0.0/0",
                    "GatewayId": options.internet_gateway_id
                }
            });
            block.insert(&mut resources, "addInternetTrafficRoute", add_internet_traffic_route)?;
        }
        block.insert(&mut resources, "routeTable", route_table)?;
        block.insert(&mut resources, "attachRouteTable", attach_route_table)?;

        Ok(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TemplateError;
    use pretty_assertions::assert_eq;

    fn options(is_private: bool) -> SubnetOptions {
        SubnetOptions {
            is_private,
            cidr: "10.0.0.0/22".into(),
            az: "us-east-1a".into(),
            vpc_id: Deferred::reference("Vpc").unwrap(),
            internet_gateway_id: (!is_private)
                .then(|| Deferred::reference("VpcInternetGateway").unwrap()),
        }
    }

    #[test]
    fn test_public_subnet_generates_internet_route() {
        let subnet = Subnet::new("PublicSubnetA", "wc-public-subnet-a", options(false), Arc::default())
            .unwrap();
        assert_eq!(
            subnet.resource_key("addInternetTrafficRoute").unwrap(),
            "PublicSubnetAAddInternetTrafficRoute"
        );

        let resources = subnet.generate().unwrap();
        let keys: Vec<&str> = resources.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "PublicSubnetA",
                "PublicSubnetAAddInternetTrafficRoute",
                "PublicSubnetARouteTable",
                "PublicSubnetAAttachRouteTable",
            ]
        );
        assert_eq!(
            resources["PublicSubnetAAddInternetTrafficRoute"]["Properties"],
            json!({
                "RouteTableId": { "Ref": "PublicSubnetARouteTable" },
                "DestinationCidrBlock": "0.0.0.0/0",
                "GatewayId": { "Ref": "VpcInternetGateway" }
            })
        );
        assert_eq!(
            resources["PublicSubnetA"]["Properties"]["Tags"][1],
            json!({ "Key": "network", "Value": "public" })
        );
    }

    #[test]
    fn test_private_subnet_withdraws_internet_route() {
        let subnet = Subnet::new("PrivateSubnetA", "wc-private-subnet-a", options(true), Arc::default())
            .unwrap();
        assert!(matches!(
            subnet.resource_key("addInternetTrafficRoute"),
            Err(TemplateError::UnknownRole { .. })
        ));

        let resources = subnet.generate().unwrap();
        assert_eq!(resources.len(), 3);
        assert!(!resources.contains_key("PrivateSubnetAAddInternetTrafficRoute"));
        assert_eq!(
            resources["PrivateSubnetA"]["Properties"]["Tags"][1]["Value"],
            "private"
        );
    }

    #[test]
    fn test_public_subnet_requires_gateway() {
        let mut options = options(false);
        options.internet_gateway_id = None;
        assert_eq!(
            Subnet::new("PublicSubnetA", "wc", options, Arc::default()).unwrap_err(),
            ValidationError::MissingField("internet gateway id")
        );
    }
}
