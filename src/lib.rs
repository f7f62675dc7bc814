//! Stack template synthesis for the Composable Information Machine
//!
//! Infrastructure is declared as independent resource blocks that reference
//! each other through deferred values, then flattened into a single
//! CloudFormation-shaped template document.
//!
//! ```rust
//! use std::sync::Arc;
//! use cim_stack_template::domain::TagSet;
//! use cim_stack_template::resources::{ResourceUnit, Subnet, SubnetOptions, Vpc, VpcOptions};
//! use cim_stack_template::template::TemplateGenerator;
//!
//! let tags = Arc::new(TagSet::new([("project", "witchcraft")]));
//! let vpc = Vpc::new(
//!     "Vpc",
//!     "wc-vpc",
//!     VpcOptions { cidr: "10.0.0.0/16".into(), ..Default::default() },
//!     tags.clone(),
//! ).unwrap();
//! let subnet = Subnet::new(
//!     "PublicSubnetA",
//!     "wc-public-subnet-a",
//!     SubnetOptions {
//!         cidr: "10.0.0.0/22".into(),
//!         az: "us-east-1a".into(),
//!         vpc_id: vpc.reference("vpc").unwrap(),
//!         internet_gateway_id: Some(vpc.reference("internetGateway").unwrap()),
//!         ..Default::default()
//!     },
//!     tags,
//! ).unwrap();
//!
//! let mut template = TemplateGenerator::new();
//! template.set_description("witchcraft");
//! template.add_resource(vpc);
//! template.add_resource(subnet);
//!
//! let document = template.generate_document().unwrap();
//! assert_eq!(document["Resources"].as_object().unwrap().len(), 7);
//! ```

pub mod builders;
pub mod config;
pub mod domain;
pub mod errors;
pub mod intrinsics;
pub mod outputs;
pub mod parameters;
pub mod resources;
pub mod template;

// Re-export commonly used types
pub use builders::{BuilderBase, StackBuilder};
pub use domain::{TagSet, ValidationError};
pub use errors::{TemplateError, TemplateResult};
pub use intrinsics::{resolve, Deferred};
pub use outputs::OutputBlock;
pub use parameters::ParameterBlock;
pub use resources::{ResourceBlock, ResourceUnit};
pub use template::TemplateGenerator;
