// Copyright (c) 2025 - Cowboy AI, Inc.
//! Synthesis Configuration
//!
//! Two layers:
//!
//! - [`SynthConfig`] - where the topology comes from and where the document
//!   goes, read from the environment
//! - [`TopologyConfig`] - the stack to build, a JSON document tagged by `kind`
//!
//! ```json
//! {
//!     "kind": "sandbox",
//!     "name": "wc-sandbox",
//!     "description": "Sandbox instances",
//!     "instances": [
//!         { "name": "Scratch", "vpc_id": "vpc-e3b9a086", "subnet_id": "subnet-4439741d" }
//!     ]
//! }
//! ```
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `STACK_TOPOLOGY` | Path to a topology JSON file | built-in three-AZ VPC |
//! | `STACK_OUTPUT` | File to write the template to | stdout |

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::builders::{
    SandboxBuilderOptions, SandboxInstanceBuilder, StackBuilder, SubnetLayout, VpcBuilder,
    VpcBuilderOptions,
};
use crate::domain::{TagSet, ValidationError};
use crate::errors::{TemplateError, TemplateResult};

/// Environment variable naming the topology file
pub const TOPOLOGY_VAR: &str = "STACK_TOPOLOGY";

/// Environment variable naming the output file
pub const OUTPUT_VAR: &str = "STACK_OUTPUT";

/// The stack to synthesize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TopologyConfig {
    Vpc(VpcBuilderOptions),
    Sandbox(SandboxBuilderOptions),
}

impl TopologyConfig {
    /// Parse a topology from JSON text
    pub fn from_json(text: &str) -> TemplateResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a topology file
    pub fn from_file(path: &Path) -> TemplateResult<Self> {
        let text = fs::read_to_string(path).map_err(|err| {
            TemplateError::Config(format!("failed to read {}: {}", path.display(), err))
        })?;
        Self::from_json(&text)
    }

    /// Validate the topology and create its builder
    pub fn into_builder(self) -> Result<Box<dyn StackBuilder>, ValidationError> {
        let builder: Box<dyn StackBuilder> = match self {
            Self::Vpc(options) => Box::new(VpcBuilder::new(options)?),
            Self::Sandbox(options) => Box::new(SandboxInstanceBuilder::new(options)?),
        };
        Ok(builder)
    }
}

/// The witchcraft development VPC: three availability zones in us-east-1
impl Default for TopologyConfig {
    fn default() -> Self {
        let zone = |name: &str, az: &str, public_cidr: &str, private_cidr: &str| SubnetLayout {
            name: name.to_string(),
            az: az.to_string(),
            public_cidr: public_cidr.to_string(),
            private_cidr: private_cidr.to_string(),
            nat_image_id: "ami-184dc970".to_string(),
            nat_instance_type: "m3.medium".to_string(),
        };

        Self::Vpc(VpcBuilderOptions {
            name: "wc-development".to_string(),
            description: "Witchcraft development VPC".to_string(),
            tags: TagSet::new([
                ("project", "witchcraft"),
                ("environment", "development"),
                ("team", "cloud"),
            ]),
            cidr: "10.0.0.0/16".to_string(),
            subnets: vec![
                zone("A", "us-east-1a", "10.0.0.0/22", "10.0.4.0/22"),
                zone("B", "us-east-1b", "10.0.8.0/22", "10.0.12.0/22"),
                zone("D", "us-east-1d", "10.0.16.0/22", "10.0.20.0/22"),
            ],
            enable_dns_support: true,
            enable_dns_host_names: true,
        })
    }
}

/// Input and output locations for one synthesis run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthConfig {
    /// Topology file; the built-in topology is used when unset
    pub topology_path: Option<PathBuf>,
    /// Output file; stdout when unset
    pub output_path: Option<PathBuf>,
}

impl SynthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = |name: &str| lookup(name).filter(|v| !v.is_empty()).map(PathBuf::from);

        Self {
            topology_path: path(TOPOLOGY_VAR),
            output_path: path(OUTPUT_VAR),
        }
    }

    /// The configured topology, or the built-in one
    pub fn topology(&self) -> TemplateResult<TopologyConfig> {
        match &self.topology_path {
            Some(path) => {
                debug!(path = %path.display(), "Loading topology");
                TopologyConfig::from_file(path)
            }
            None => {
                debug!("Using built-in topology");
                Ok(TopologyConfig::default())
            }
        }
    }
}
