// Copyright (c) 2025 - Cowboy AI, Inc.
//! Sandbox Instance Builder
//!
//! Standalone instances dropped into existing VPCs and subnets, one
//! [`SandboxInstance`] block and one instance id output per entry.

use serde::{Deserialize, Serialize};

use super::{BuilderBase, StackBuilder};
use crate::domain::invariants::validate_non_empty_list;
use crate::domain::{TagSet, ValidationError};
use crate::errors::TemplateResult;
use crate::intrinsics::Deferred;
use crate::outputs::OutputBlock;
use crate::resources::{ResourceUnit, SandboxInstance, SandboxInstanceOptions};
use crate::template::TemplateGenerator;

/// One sandbox instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandboxInstanceSpec {
    /// Block key; also the output name
    pub name: String,
    pub vpc_id: String,
    pub subnet_id: String,
    #[serde(default = "default_image_id")]
    pub image_id: String,
    #[serde(default = "default_instance_type")]
    pub instance_type: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub ssh_key_name: Option<String>,
}

fn default_image_id() -> String {
    "ami-d05e75b8".to_string()
}

fn default_instance_type() -> String {
    "t2.micro".to_string()
}

/// Declarative description of a sandbox stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandboxBuilderOptions {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: TagSet,
    pub instances: Vec<SandboxInstanceSpec>,
}

/// Builds a set of sandbox instances
#[derive(Debug, Clone)]
pub struct SandboxInstanceBuilder {
    base: BuilderBase,
    instances: Vec<SandboxInstanceSpec>,
}

impl SandboxInstanceBuilder {
    pub fn new(options: SandboxBuilderOptions) -> Result<Self, ValidationError> {
        let base = BuilderBase::new(options.name, options.description, options.tags)?;
        validate_non_empty_list("instances", &options.instances)?;

        Ok(Self {
            base,
            instances: options.instances,
        })
    }
}

impl StackBuilder for SandboxInstanceBuilder {
    fn base(&self) -> &BuilderBase {
        &self.base
    }

    fn add_resources(
        &self,
        template: &mut TemplateGenerator,
        outputs: &mut Vec<OutputBlock>,
    ) -> TemplateResult<()> {
        for entry in &self.instances {
            let instance = SandboxInstance::new(
                entry.name.as_str(),
                self.base.res_name(&entry.name),
                SandboxInstanceOptions {
                    vpc_id: entry.vpc_id.as_str().into(),
                    subnet_id: entry.subnet_id.as_str().into(),
                    image_id: entry.image_id.as_str().into(),
                    instance_type: entry.instance_type.as_str().into(),
                    is_public: entry.is_public,
                    ssh_key_name: entry.ssh_key_name.as_deref().map(Deferred::from),
                },
                self.base.tags(),
            )?;

            outputs.push(OutputBlock::new(
                entry.name.as_str(),
                format!("Instance id for instance {}", entry.name),
                instance.reference("instance")?,
            )?);
            template.add_resource(instance);
        }

        Ok(())
    }
}
