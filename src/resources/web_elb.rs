// Copyright (c) 2025 - Cowboy AI, Inc.
//! Web Load Balancer Block
//!
//! A classic load balancer for HTTP(S) traffic plus the security group that
//! admits it. Listeners and ingress rules track each other: plain HTTP on port
//! 80 unless disabled, HTTPS on port 443 only when a certificate is given.
//! A balancer with HTTP disabled and no certificate has no listeners at all.

use serde_json::{json, Value};
use std::sync::Arc;

use super::{require, ResourceBlock, ResourceUnit, Resources};
use crate::domain::{TagSet, ValidationError};
use crate::errors::TemplateResult;
use crate::intrinsics::Deferred;

/// Construction options for [`WebElb`]
#[derive(Debug, Clone, PartialEq)]
pub struct WebElbOptions {
    /// Internal balancers are only reachable from inside the VPC
    pub is_private: bool,
    pub vpc_id: Deferred,
    /// Subnets the balancer spans, usually a [`Deferred::List`]
    pub subnets: Deferred,
    /// Port the back-end instances listen on
    pub instance_port: u16,
    pub health_check_path: String,
    /// Enables the HTTPS listener
    pub ssl_certificate_id: Option<Deferred>,
    /// Drops the HTTP listener
    pub disable_http: bool,
}

impl Default for WebElbOptions {
    fn default() -> Self {
        Self {
            is_private: false,
            vpc_id: Deferred::default(),
            subnets: Deferred::default(),
            instance_port: 80,
            health_check_path: "/".to_string(),
            ssl_certificate_id: None,
            disable_http: false,
        }
    }
}

/// Load balancer and its security group
///
/// Roles: `elb`, `securityGroup`
#[derive(Debug, Clone)]
pub struct WebElb {
    block: ResourceBlock,
    options: WebElbOptions,
}

impl WebElb {
    pub fn new(
        base_key: impl Into<String>,
        base_name: impl Into<String>,
        options: WebElbOptions,
        tags: Arc<TagSet>,
    ) -> Result<Self, ValidationError> {
        require("vpc id", &options.vpc_id)?;
        require("subnets", &options.subnets)?;

        let block = ResourceBlock::new(base_key, base_name, tags)?
            .with_role("elb", "")
            .with_role("securityGroup", "SecurityGroup");

        Ok(Self { block, options })
    }

    fn ingress(port: u16) -> Value {
        json!({
            "IpProtocol": "tcp",
            "FromPort": port.to_string(),
            "ToPort": port.to_string(),
            "CidrIp": "0.0.0.0/0"
        })
    }
}

impl ResourceUnit for WebElb {
    fn block(&self) -> &ResourceBlock {
        &self.block
    }

    fn generate(&self) -> TemplateResult<Resources> {
        let block = &self.block;
        let options = &self.options;

        let mut ingress = Vec::new();
        let mut listeners = Vec::new();

        if !options.disable_http {
            ingress.push(Self::ingress(80));
            listeners.push(json!({
                "LoadBalancerPort": 80,
                "InstancePort": options.instance_port,
                "Protocol": "HTTP",
                "InstanceProtocol": "HTTP"
            }));
        }

        if let Some(certificate) = &options.ssl_certificate_id {
            ingress.push(Self::ingress(443));
            listeners.push(json!({
                "LoadBalancerPort": 443,
                "InstancePort": options.instance_port,
                "Protocol": "HTTPS",
                "InstanceProtocol": "HTTP",
                "SSLCertificateId": certificate
            }));
        }

        let mut security_group = json!({
            "Type": "AWS::EC2::SecurityGroup",
            "Properties": {
                "GroupDescription": "Security rules for web ELB instances",
                "VpcId": options.vpc_id,
                "SecurityGroupIngress": ingress,
                "SecurityGroupEgress": [],
                "Tags": [ block.name_tag("security-group") ]
            }
        });
        block.apply_tags(&mut security_group)?;

        let mut elb = json!({
            "Type": "AWS::ElasticLoadBalancing::LoadBalancer",
            "Properties": {
                "Subnets": options.subnets,
                "Scheme": if options.is_private { "internal" } else { "internet-facing" },
                "Listeners": listeners,
                "HealthCheck": {
                    "Target": format!("HTTP:{}{}", options.instance_port, options.health_check_path),
                    "HealthyThreshold": 3,
                    "UnhealthyThreshold": 5,
                    "Interval": 30,
                    "Timeout": 5
                },
                "SecurityGroups": [ block.local_ref("securityGroup")? ],
                "ConnectionDrainingPolicy": { "Enabled": true },
                "Tags": [ block.name_tag("") ]
            }
        });
        block.apply_tags(&mut elb)?;

        let mut resources = Resources::new();
        block.insert(&mut resources, "securityGroup", security_group)?;
        block.insert(&mut resources, "elb", elb)?;

        Ok(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn elb(options: WebElbOptions) -> Resources {
        WebElb::new(
            "FeElb",
            "wc-fe-elb",
            WebElbOptions {
                vpc_id: Deferred::reference("Vpc").unwrap(),
                subnets: Deferred::list([
                    Deferred::reference("PublicSubnetA").unwrap(),
                    Deferred::reference("PublicSubnetB").unwrap(),
                ]),
                ..options
            },
            Arc::default(),
        )
        .unwrap()
        .generate()
        .unwrap()
    }

    #[test]
    fn test_default_elb_listens_on_http() {
        let resources = elb(WebElbOptions::default());
        let properties = &resources["FeElb"]["Properties"];

        assert_eq!(properties["Scheme"], "internet-facing");
        assert_eq!(properties["HealthCheck"]["Target"], "HTTP:80/");
        assert_eq!(
            properties["Listeners"],
            json!([{
                "LoadBalancerPort": 80,
                "InstancePort": 80,
                "Protocol": "HTTP",
                "InstanceProtocol": "HTTP"
            }])
        );
        assert_eq!(
            properties["Subnets"],
            json!([{ "Ref": "PublicSubnetA" }, { "Ref": "PublicSubnetB" }])
        );
        assert_eq!(
            resources["FeElbSecurityGroup"]["Properties"]["SecurityGroupIngress"][0]["FromPort"],
            "80"
        );
    }

    #[test]
    fn test_https_only() {
        let resources = elb(WebElbOptions {
            is_private: true,
            instance_port: 8080,
            health_check_path: "/health".to_string(),
            ssl_certificate_id: Some("arn:aws:iam::123:server-certificate/wc".into()),
            disable_http: true,
            ..Default::default()
        });
        let properties = &resources["FeElb"]["Properties"];

        assert_eq!(properties["Scheme"], "internal");
        assert_eq!(properties["HealthCheck"]["Target"], "HTTP:8080/health");
        let listeners = properties["Listeners"].as_array().unwrap();
        assert_eq!(listeners.len(), 1);
        assert_eq!(listeners[0]["Protocol"], "HTTPS");
        assert_eq!(listeners[0]["InstancePort"], 8080);
        assert_eq!(
            resources["FeElbSecurityGroup"]["Properties"]["SecurityGroupIngress"],
            json!([{ "IpProtocol": "tcp", "FromPort": "443", "ToPort": "443", "CidrIp": "0.0.0.0/0" }])
        );
    }

    #[test]
    fn test_no_listeners_is_accepted() {
        let resources = elb(WebElbOptions {
            disable_http: true,
            ..Default::default()
        });
        assert_eq!(resources["FeElb"]["Properties"]["Listeners"], json!([]));
        assert_eq!(
            resources["FeElbSecurityGroup"]["Properties"]["SecurityGroupIngress"],
            json!([])
        );
    }

    #[test]
    fn test_keys_and_order() {
        let resources = elb(WebElbOptions::default());
        let keys: Vec<&str> = resources.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["FeElbSecurityGroup", "FeElb"]);
    }
}
