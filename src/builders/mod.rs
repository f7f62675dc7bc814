// Copyright (c) 2025 - Cowboy AI, Inc.
//! Composite Stack Builders
//!
//! A builder turns a compact, declarative description (a VPC with N
//! availability zones, a handful of sandbox instances) into a complete
//! template. It creates the resource blocks, wires their role keys together
//! through deferred references, and collects the outputs worth publishing.
//!
//! ```text
//! build()
//!   ├─ fresh TemplateGenerator (description set)
//!   ├─ add_parameters()        optional
//!   ├─ add_resources()         required, also collects outputs
//!   ├─ outputs -> template
//!   └─ TemplateGenerator::generate()
//! ```
//!
//! Every call to `build()` starts from a fresh generator, so a builder can be
//! built any number of times with identical results.

pub mod sandbox;
pub mod vpc;

pub use sandbox::{SandboxBuilderOptions, SandboxInstanceBuilder, SandboxInstanceSpec};
pub use vpc::{SubnetLayout, VpcBuilder, VpcBuilderOptions};

use serde_json::Value;
use std::sync::Arc;

use crate::domain::invariants::validate_non_empty;
use crate::domain::{hyphenate, suffixed, TagSet, ValidationError};
use crate::errors::TemplateResult;
use crate::outputs::OutputBlock;
use crate::template::TemplateGenerator;

/// Name, description and tags shared by every block a builder creates
#[derive(Debug, Clone)]
pub struct BuilderBase {
    base_name: String,
    description: String,
    tags: Arc<TagSet>,
}

impl BuilderBase {
    /// # Invariants
    /// - `base_name` must be non-empty
    /// - `description` must be non-empty
    pub fn new(
        base_name: impl Into<String>,
        description: impl Into<String>,
        tags: TagSet,
    ) -> Result<Self, ValidationError> {
        let base_name = base_name.into();
        let description = description.into();
        validate_non_empty("base name", &base_name)?;
        validate_non_empty("description", &description)?;

        Ok(Self {
            base_name,
            description,
            tags: Arc::new(tags),
        })
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Shared handle to the stack-wide tags
    pub fn tags(&self) -> Arc<TagSet> {
        Arc::clone(&self.tags)
    }

    /// Resource name for a logical block name: `base_name-hyphenated-name`
    pub fn res_name(&self, name: &str) -> String {
        suffixed(&self.base_name, &hyphenate(name))
    }
}

/// A reusable recipe for a complete stack template
pub trait StackBuilder {
    fn base(&self) -> &BuilderBase;

    /// Register template parameters; most builders have none
    fn add_parameters(&self, _template: &mut TemplateGenerator) -> TemplateResult<()> {
        Ok(())
    }

    /// Register resource blocks and collect the outputs to publish
    fn add_resources(
        &self,
        template: &mut TemplateGenerator,
        outputs: &mut Vec<OutputBlock>,
    ) -> TemplateResult<()>;

    /// Populate a fresh generator with everything this builder declares
    fn assemble(&self) -> TemplateResult<TemplateGenerator> {
        let mut template = TemplateGenerator::new();
        template.set_description(self.base().description());

        self.add_parameters(&mut template)?;

        let mut outputs = Vec::new();
        self.add_resources(&mut template, &mut outputs)?;
        for output in outputs {
            template.add_output(output);
        }

        Ok(template)
    }

    /// Assemble the template document as JSON
    fn build_document(&self) -> TemplateResult<Value> {
        self.assemble()?.generate_document()
    }

    /// Assemble and serialize the template
    fn build(&self) -> TemplateResult<String> {
        self.assemble()?.generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterBlock;
    use pretty_assertions::assert_eq;

    struct ParametersOnly {
        base: BuilderBase,
    }

    impl StackBuilder for ParametersOnly {
        fn base(&self) -> &BuilderBase {
            &self.base
        }

        fn add_parameters(&self, template: &mut TemplateGenerator) -> TemplateResult<()> {
            template.add_parameter(ParameterBlock::new("KeyName", "String")?);
            Ok(())
        }

        fn add_resources(
            &self,
            _template: &mut TemplateGenerator,
            outputs: &mut Vec<OutputBlock>,
        ) -> TemplateResult<()> {
            outputs.push(OutputBlock::new("Region", "Deployment region", "us-east-1")?);
            Ok(())
        }
    }

    fn base() -> BuilderBase {
        BuilderBase::new("wc-dev", "Witchcraft development", TagSet::default()).unwrap()
    }

    #[test]
    fn test_builder_base_validation() {
        assert_eq!(
            BuilderBase::new("", "d", TagSet::default()).unwrap_err(),
            ValidationError::EmptyField("base name")
        );
        assert_eq!(
            BuilderBase::new("n", "", TagSet::default()).unwrap_err(),
            ValidationError::EmptyField("description")
        );
    }

    #[test]
    fn test_res_name() {
        let base = base();
        assert_eq!(base.res_name(""), "wc-dev");
        assert_eq!(base.res_name("PublicSubnetA"), "wc-dev-public-subnet-a");
    }

    #[test]
    fn test_build_collects_parameters_and_outputs() {
        let builder = ParametersOnly { base: base() };
        let document = builder.build_document().unwrap();

        assert_eq!(document["Description"], "Witchcraft development");
        assert_eq!(document["Parameters"]["KeyName"]["Type"], "String");
        assert_eq!(document["Outputs"]["Region"]["Value"], "us-east-1");
        assert!(document.get("Resources").is_none());
    }

    #[test]
    fn test_build_is_repeatable() {
        let builder = ParametersOnly { base: base() };
        assert_eq!(builder.build().unwrap(), builder.build().unwrap());
    }
}
