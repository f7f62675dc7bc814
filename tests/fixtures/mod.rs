// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-stack-template
//!
//! Provides the witchcraft development network used across integration tests.
//! Every fixture is deterministic and builds fresh blocks on each call.
//!
//! # Design Principles
//! - Fixtures are the ONLY place that wires blocks together by hand
//! - Tests use fixtures, never ad-hoc tag sets or CIDR blocks

#![allow(dead_code)]

use std::sync::Arc;

use cim_stack_template::builders::{SubnetLayout, VpcBuilderOptions};
use cim_stack_template::domain::TagSet;
use cim_stack_template::resources::{ResourceUnit, Subnet, SubnetOptions, Vpc, VpcOptions};

pub const VPC_CIDR: &str = "10.0.0.0/16";
pub const PUBLIC_SUBNET_CIDR: &str = "10.0.0.0/22";
pub const PRIVATE_SUBNET_CIDR: &str = "10.0.4.0/22";
pub const AZ: &str = "us-east-1a";

/// Stack-wide tags of the witchcraft development environment
pub fn stack_tags() -> Arc<TagSet> {
    Arc::new(TagSet::new([
        ("project", "witchcraft"),
        ("environment", "development"),
        ("team", "cloud"),
    ]))
}

pub fn vpc(tags: Arc<TagSet>) -> Vpc {
    Vpc::new(
        "Vpc",
        "wc-development-vpc",
        VpcOptions {
            cidr: VPC_CIDR.into(),
            enable_dns_support: true,
            enable_dns_host_names: true,
        },
        tags,
    )
    .expect("valid vpc fixture")
}

pub fn public_subnet(vpc: &Vpc, tags: Arc<TagSet>) -> Subnet {
    Subnet::new(
        "PublicSubnetA",
        "wc-development-public-subnet-a",
        SubnetOptions {
            is_private: false,
            cidr: PUBLIC_SUBNET_CIDR.into(),
            az: AZ.into(),
            vpc_id: vpc.reference("vpc").expect("vpc role"),
            internet_gateway_id: Some(vpc.reference("internetGateway").expect("gateway role")),
        },
        tags,
    )
    .expect("valid public subnet fixture")
}

pub fn private_subnet(vpc: &Vpc, tags: Arc<TagSet>) -> Subnet {
    Subnet::new(
        "PrivateSubnetA",
        "wc-development-private-subnet-a",
        SubnetOptions {
            is_private: true,
            cidr: PRIVATE_SUBNET_CIDR.into(),
            az: AZ.into(),
            vpc_id: vpc.reference("vpc").expect("vpc role"),
            internet_gateway_id: None,
        },
        tags,
    )
    .expect("valid private subnet fixture")
}

/// Two-zone VPC builder options
pub fn vpc_builder_options() -> VpcBuilderOptions {
    let zone = |name: &str, az: &str, public_cidr: &str, private_cidr: &str| SubnetLayout {
        name: name.to_string(),
        az: az.to_string(),
        public_cidr: public_cidr.to_string(),
        private_cidr: private_cidr.to_string(),
        nat_image_id: "ami-184dc970".to_string(),
        nat_instance_type: "m3.medium".to_string(),
    };

    VpcBuilderOptions {
        name: "wc-development".to_string(),
        description: "Witchcraft development VPC".to_string(),
        tags: (*stack_tags()).clone(),
        cidr: VPC_CIDR.to_string(),
        subnets: vec![
            zone("A", "us-east-1a", "10.0.0.0/22", "10.0.4.0/22"),
            zone("B", "us-east-1b", "10.0.8.0/22", "10.0.12.0/22"),
        ],
        enable_dns_support: true,
        enable_dns_host_names: false,
    }
}
