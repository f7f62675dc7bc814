// Copyright (c) 2025 - Cowboy AI, Inc.
//! Multi-AZ VPC Builder
//!
//! One VPC plus, per availability zone, a public subnet, a private subnet and
//! a NAT instance routing the private subnet's outbound traffic.
//!
//! ```text
//! Vpc
//! ├─ PublicSubnet{n}   route 0.0.0.0/0 -> Vpc internet gateway
//! ├─ PrivateSubnet{n}  route 0.0.0.0/0 -> NatSubnet{n} instance
//! └─ NatSubnet{n}      launched in PublicSubnet{n}
//! ```

use serde::{Deserialize, Serialize};

use super::{BuilderBase, StackBuilder};
use crate::domain::invariants::{validate_non_empty, validate_non_empty_list};
use crate::domain::{TagSet, ValidationError};
use crate::errors::TemplateResult;
use crate::outputs::OutputBlock;
use crate::resources::{Nat, NatOptions, ResourceUnit, Subnet, SubnetOptions, Vpc, VpcOptions};
use crate::template::TemplateGenerator;

/// Subnets and NAT instance for one availability zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubnetLayout {
    /// Suffix of the block keys, e.g. `A` for `PublicSubnetA`
    pub name: String,
    pub az: String,
    pub public_cidr: String,
    pub private_cidr: String,
    pub nat_image_id: String,
    pub nat_instance_type: String,
}

/// Declarative description of a VPC stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpcBuilderOptions {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: TagSet,
    pub cidr: String,
    pub subnets: Vec<SubnetLayout>,
    #[serde(default = "enabled")]
    pub enable_dns_support: bool,
    #[serde(default)]
    pub enable_dns_host_names: bool,
}

fn enabled() -> bool {
    true
}

/// Builds a VPC spanning one or more availability zones
#[derive(Debug, Clone)]
pub struct VpcBuilder {
    base: BuilderBase,
    cidr: String,
    subnets: Vec<SubnetLayout>,
    enable_dns_support: bool,
    enable_dns_host_names: bool,
}

impl VpcBuilder {
    /// # Invariants
    /// - name and description must be non-empty
    /// - `cidr` must be non-empty
    /// - at least one subnet layout is required
    pub fn new(options: VpcBuilderOptions) -> Result<Self, ValidationError> {
        let base = BuilderBase::new(options.name, options.description, options.tags)?;
        validate_non_empty("cidr", &options.cidr)?;
        validate_non_empty_list("subnets", &options.subnets)?;

        Ok(Self {
            base,
            cidr: options.cidr,
            subnets: options.subnets,
            enable_dns_support: options.enable_dns_support,
            enable_dns_host_names: options.enable_dns_host_names,
        })
    }

    pub fn subnets(&self) -> &[SubnetLayout] {
        &self.subnets
    }
}

impl StackBuilder for VpcBuilder {
    fn base(&self) -> &BuilderBase {
        &self.base
    }

    fn add_resources(
        &self,
        template: &mut TemplateGenerator,
        outputs: &mut Vec<OutputBlock>,
    ) -> TemplateResult<()> {
        let base = &self.base;

        let vpc = Vpc::new(
            "Vpc",
            base.res_name(""),
            VpcOptions {
                cidr: self.cidr.as_str().into(),
                enable_dns_support: self.enable_dns_support,
                enable_dns_host_names: self.enable_dns_host_names,
            },
            base.tags(),
        )?;
        let vpc_id = vpc.reference("vpc")?;
        let internet_gateway_id = vpc.reference("internetGateway")?;
        outputs.push(OutputBlock::new("Vpc", "Vpc id", vpc_id.clone())?);
        template.add_resource(vpc);

        for layout in &self.subnets {
            let suffix = format!("Subnet{}", layout.name);
            let public_name = format!("Public{suffix}");
            let private_name = format!("Private{suffix}");
            let nat_name = format!("Nat{suffix}");

            let public_subnet = Subnet::new(
                public_name.as_str(),
                base.res_name(&public_name),
                SubnetOptions {
                    is_private: false,
                    cidr: layout.public_cidr.as_str().into(),
                    az: layout.az.as_str().into(),
                    vpc_id: vpc_id.clone(),
                    internet_gateway_id: Some(internet_gateway_id.clone()),
                },
                base.tags(),
            )?;

            let private_subnet = Subnet::new(
                private_name.as_str(),
                base.res_name(&private_name),
                SubnetOptions {
                    is_private: true,
                    cidr: layout.private_cidr.as_str().into(),
                    az: layout.az.as_str().into(),
                    vpc_id: vpc_id.clone(),
                    internet_gateway_id: None,
                },
                base.tags(),
            )?;

            let nat = Nat::new(
                nat_name.as_str(),
                base.res_name(&nat_name),
                NatOptions {
                    vpc_id: vpc_id.clone(),
                    image_id: layout.nat_image_id.as_str().into(),
                    instance_type: layout.nat_instance_type.as_str().into(),
                    public_subnet_id: public_subnet.reference("subnet")?,
                    private_subnet_route_table_id: private_subnet.reference("routeTable")?,
                },
                base.tags(),
            )?;

            outputs.push(OutputBlock::new(
                public_name.as_str(),
                format!("Subnet id for {public_name}"),
                public_subnet.reference("subnet")?,
            )?);
            outputs.push(OutputBlock::new(
                private_name.as_str(),
                format!("Subnet id for {private_name}"),
                private_subnet.reference("subnet")?,
            )?);

            template.add_resource(public_subnet);
            template.add_resource(private_subnet);
            template.add_resource(nat);
        }

        Ok(())
    }
}
