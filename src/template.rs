// Copyright (c) 2025 - Cowboy AI, Inc.
//! Template Assembly
//!
//! [`TemplateGenerator`] collects outputs, parameters and resource blocks and
//! flattens them into one template document:
//!
//! ```text
//! {
//!     "Description": ...,
//!     "Parameters": { ... },   omitted when empty
//!     "Resources":  { ... },   omitted when empty
//!     "Outputs":    { ... }    omitted when empty
//! }
//! ```
//!
//! Blocks are generated in the order outputs, parameters, resources, each
//! kind in registration order. Within a section, entries keep the order in
//! which they were generated; a key generated twice keeps its first position
//! and takes the last body.
//!
//! Generation never mutates the generator, so repeated calls yield
//! byte-identical documents. Any failure aborts the whole document.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::errors::{TemplateError, TemplateResult};
use crate::outputs::OutputBlock;
use crate::parameters::ParameterBlock;
use crate::resources::ResourceUnit;

const INDENT: &[u8] = b"    ";

/// Collects blocks and assembles the template document
#[derive(Debug, Default)]
pub struct TemplateGenerator {
    description: String,
    parameters: Vec<ParameterBlock>,
    resources: Vec<Box<dyn ResourceUnit>>,
    outputs: Vec<OutputBlock>,
}

impl TemplateGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template description (any string, including empty)
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn add_parameter(&mut self, block: ParameterBlock) {
        self.parameters.push(block);
    }

    pub fn add_resource<R: ResourceUnit + 'static>(&mut self, block: R) {
        self.resources.push(Box::new(block));
    }

    pub fn add_output(&mut self, block: OutputBlock) {
        self.outputs.push(block);
    }

    /// Assemble the document as JSON
    pub fn generate_document(&self) -> TemplateResult<Value> {
        debug!(
            outputs = self.outputs.len(),
            parameters = self.parameters.len(),
            resources = self.resources.len(),
            "Assembling stack template"
        );

        let mut outputs = Map::new();
        for block in &self.outputs {
            trace!(output = block.name(), "Generating output");
            outputs.extend(block.generate());
        }

        let mut parameters = Map::new();
        for block in &self.parameters {
            trace!(parameter = block.name(), "Generating parameter");
            parameters.extend(block.generate());
        }

        let mut resources = Map::new();
        for block in &self.resources {
            trace!(block = block.block().base_key(), "Generating resources");
            resources.extend(block.generate()?);
        }

        let mut document = Map::new();
        document.insert("Description".to_string(), Value::from(self.description.as_str()));
        for (section, entries) in [
            ("Parameters", parameters),
            ("Resources", resources),
            ("Outputs", outputs),
        ] {
            if entries.is_empty() {
                trace!(section, "Omitting empty section");
                continue;
            }
            debug!(section, entries = entries.len(), "Assembled section");
            document.insert(section.to_string(), Value::Object(entries));
        }

        Ok(Value::Object(document))
    }

    /// Assemble the document and serialize it with four-space indentation
    pub fn generate(&self) -> TemplateResult<String> {
        let document = self.generate_document()?;

        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
        document.serialize(&mut serializer)?;

        String::from_utf8(buffer).map_err(|err| TemplateError::Serialization(err.to_string()))
    }
}
