// Copyright (c) 2025 - Cowboy AI, Inc.
//! OpsWorks Instance Pool Block
//!
//! A fixed-size pool of OpsWorks instances of one kind (24/7, load based or
//! time based). Member `i` gets the role `instance{i}`, stored under the key
//! `{base_key}{i}`, and is placed in subnet `i % subnet_ids.len()` so the
//! pool spreads across availability zones.

use serde_json::json;
use std::sync::Arc;

use super::{require, ResourceBlock, ResourceUnit, Resources};
use crate::domain::invariants::{validate_count, validate_non_empty_list};
use crate::domain::{TagSet, ValidationError};
use crate::errors::TemplateResult;
use crate::intrinsics::Deferred;

/// How OpsWorks starts and stops the pool's instances
#[derive(Debug, Clone, PartialEq)]
pub enum AutoScaling {
    /// Started and stopped on load thresholds
    Load,
    /// Started and stopped on a weekly schedule (`TimeBasedAutoScaling`)
    Timer(Deferred),
}

/// Construction options for [`OpsWorksInstance`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpsWorksInstanceOptions {
    /// Number of pool members (must be greater than zero)
    pub instance_count: usize,
    /// Subnets to spread members across (must not be empty)
    pub subnet_ids: Vec<Deferred>,
    pub instance_type: Deferred,
    pub stack_id: Deferred,
    pub layer_ids: Deferred,
    pub ssh_key_name: Option<Deferred>,
    pub os: Option<Deferred>,
    pub ami_id: Option<Deferred>,
    /// Instances run 24/7 when unset
    pub auto_scaling: Option<AutoScaling>,
}

/// Pool of OpsWorks instances
///
/// Roles: `instance0` .. `instance{n-1}`
#[derive(Debug, Clone)]
pub struct OpsWorksInstance {
    block: ResourceBlock,
    options: OpsWorksInstanceOptions,
}

impl OpsWorksInstance {
    pub fn new(
        base_key: impl Into<String>,
        base_name: impl Into<String>,
        options: OpsWorksInstanceOptions,
        tags: Arc<TagSet>,
    ) -> Result<Self, ValidationError> {
        validate_count("instance count", options.instance_count)?;
        validate_non_empty_list("subnet ids", &options.subnet_ids)?;
        require("stack id", &options.stack_id)?;
        require("layer ids", &options.layer_ids)?;

        let mut block = ResourceBlock::new(base_key, base_name, tags)?;
        for index in 0..options.instance_count {
            block.declare_role(Self::role(index), &index.to_string());
        }

        Ok(Self { block, options })
    }

    /// Role name of pool member `index`
    pub fn role(index: usize) -> String {
        format!("instance{index}")
    }

    pub fn instance_count(&self) -> usize {
        self.options.instance_count
    }
}

impl ResourceUnit for OpsWorksInstance {
    fn block(&self) -> &ResourceBlock {
        &self.block
    }

    fn generate(&self) -> TemplateResult<Resources> {
        let options = &self.options;
        let mut resources = Resources::new();

        for index in 0..options.instance_count {
            let subnet_id = &options.subnet_ids[index % options.subnet_ids.len()];
            let mut instance = json!({
                "Type": "AWS::OpsWorks::Instance",
                "Properties": {
                    "InstanceType": options.instance_type,
                    "StackId": options.stack_id,
                    "LayerIds": options.layer_ids,
                    "SubnetId": subnet_id
                }
            });

            let properties = &mut instance["Properties"];
            let optional = [
                ("SshKeyName", &options.ssh_key_name),
                ("Os", &options.os),
                ("AmiId", &options.ami_id),
            ];
            for (name, value) in optional {
                if let Some(value) = value.as_ref().filter(|v| !v.is_absent()) {
                    properties[name] = value.resolve();
                }
            }

            match &options.auto_scaling {
                Some(AutoScaling::Timer(schedule)) => {
                    properties["AutoScalingType"] = json!("timer");
                    properties["TimeBasedAutoScaling"] = schedule.resolve();
                }
                Some(AutoScaling::Load) => properties["AutoScalingType"] = json!("load"),
                None => {}
            }

            self.block.insert(&mut resources, &Self::role(index), instance)?;
        }

        Ok(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options(instance_count: usize) -> OpsWorksInstanceOptions {
        OpsWorksInstanceOptions {
            instance_count,
            subnet_ids: vec![
                Deferred::reference("PrivateSubnetA").unwrap(),
                Deferred::reference("PrivateSubnetB").unwrap(),
            ],
            instance_type: "t2.small".into(),
            stack_id: Deferred::reference("AppStack").unwrap(),
            layer_ids: Deferred::list([Deferred::reference("ApiLayer").unwrap()]),
            ..Default::default()
        }
    }

    #[test]
    fn test_pool_keys_and_subnet_rotation() {
        let pool = OpsWorksInstance::new("ApiInstance", "wc-api", options(3), Arc::default())
            .unwrap();
        assert_eq!(pool.resource_key("instance2").unwrap(), "ApiInstance2");

        let resources = pool.generate().unwrap();
        let keys: Vec<&str> = resources.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ApiInstance0", "ApiInstance1", "ApiInstance2"]);

        let subnets: Vec<_> = resources
            .values()
            .map(|instance| instance["Properties"]["SubnetId"]["Ref"].clone())
            .collect();
        assert_eq!(
            subnets,
            vec![json!("PrivateSubnetA"), json!("PrivateSubnetB"), json!("PrivateSubnetA")]
        );
        assert_eq!(
            resources["ApiInstance0"]["Properties"]["LayerIds"],
            json!([{ "Ref": "ApiLayer" }])
        );
    }

    #[test]
    fn test_optional_properties() {
        let pool = OpsWorksInstance::new(
            "ApiInstance",
            "wc-api",
            OpsWorksInstanceOptions {
                ssh_key_name: Some("wc-dev".into()),
                ami_id: Some("ami-d05e75b8".into()),
                auto_scaling: Some(AutoScaling::Load),
                ..options(1)
            },
            Arc::default(),
        )
        .unwrap();
        let resources = pool.generate().unwrap();
        let properties = &resources["ApiInstance0"]["Properties"];

        assert_eq!(properties["SshKeyName"], "wc-dev");
        assert_eq!(properties["AmiId"], "ami-d05e75b8");
        assert!(properties.get("Os").is_none());
        assert_eq!(properties["AutoScalingType"], "load");
        assert!(properties.get("TimeBasedAutoScaling").is_none());
    }

    #[test]
    fn test_timer_auto_scaling() {
        let schedule = json!({ "Monday": { "9": "on", "17": "off" } });
        let pool = OpsWorksInstance::new(
            "ApiInstance",
            "wc-api",
            OpsWorksInstanceOptions {
                auto_scaling: Some(AutoScaling::Timer(schedule.clone().into())),
                ..options(1)
            },
            Arc::default(),
        )
        .unwrap();
        let resources = pool.generate().unwrap();
        let properties = &resources["ApiInstance0"]["Properties"];

        assert_eq!(properties["AutoScalingType"], "timer");
        assert_eq!(properties["TimeBasedAutoScaling"], schedule);
    }

    #[test]
    fn test_pool_validation() {
        assert_eq!(
            OpsWorksInstance::new("I", "i", options(0), Arc::default()).unwrap_err(),
            ValidationError::InvalidCount("instance count")
        );
        assert_eq!(
            OpsWorksInstance::new(
                "I",
                "i",
                OpsWorksInstanceOptions {
                    subnet_ids: Vec::new(),
                    ..options(2)
                },
                Arc::default()
            )
            .unwrap_err(),
            ValidationError::EmptyList("subnet ids")
        );
    }
}
