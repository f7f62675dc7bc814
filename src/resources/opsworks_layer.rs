// Copyright (c) 2025 - Cowboy AI, Inc.
//! OpsWorks Node.js Layer Block
//!
//! A custom OpsWorks layer running the Node.js recipes, the app deployed to
//! it from S3, and the attachment of an existing load balancer.

use serde_json::json;
use std::sync::Arc;

use super::{require, ResourceBlock, ResourceUnit, Resources};
use crate::domain::{TagSet, ValidationError};
use crate::errors::TemplateResult;
use crate::intrinsics::Deferred;

/// Construction options for [`OpsWorksNodeLayer`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpsWorksNodeLayerOptions {
    pub stack_id: Deferred,
    pub layer_short_name: Deferred,
    /// Load balancer attached to the layer
    pub elb_name: Deferred,
    pub app_name: Deferred,
    /// S3 location of the app bundle
    pub app_url: Deferred,
    pub app_version: Deferred,
    pub app_user_name: Option<Deferred>,
    pub app_password: Option<Deferred>,
}

/// OpsWorks layer, app and load balancer attachment
///
/// Roles: `layer`, `app`, `attachElb`
#[derive(Debug, Clone)]
pub struct OpsWorksNodeLayer {
    block: ResourceBlock,
    options: OpsWorksNodeLayerOptions,
}

impl OpsWorksNodeLayer {
    pub fn new(
        base_key: impl Into<String>,
        base_name: impl Into<String>,
        options: OpsWorksNodeLayerOptions,
        tags: Arc<TagSet>,
    ) -> Result<Self, ValidationError> {
        require("stack id", &options.stack_id)?;
        require("layer short name", &options.layer_short_name)?;
        require("elb name", &options.elb_name)?;
        require("app name", &options.app_name)?;
        require("app url", &options.app_url)?;

        let block = ResourceBlock::new(base_key, base_name, tags)?
            .with_role("layer", "")
            .with_role("app", "App")
            .with_role("attachElb", "AttachElb");

        Ok(Self { block, options })
    }
}

impl ResourceUnit for OpsWorksNodeLayer {
    fn block(&self) -> &ResourceBlock {
        &self.block
    }

    fn generate(&self) -> TemplateResult<Resources> {
        let block = &self.block;
        let options = &self.options;

        let layer = json!({
            "Type": "AWS::OpsWorks::Layer",
            "Properties": {
                "Name": block.res_name(""),
                "Shortname": options.layer_short_name,
                "StackId": options.stack_id,
                "Type": "custom",
                "EnableAutoHealing": true,
                "AutoAssignElasticIps": false,
                "AutoAssignPublicIps": false,
                "CustomRecipes": {
                    "Setup": [ "opsworks_nodejs" ],
                    "Configure": [ "opsworks_nodejs::configure" ],
                    "Deploy": [ "opsworks_nodejs", "deploy::nodejs" ],
                    "Undeploy": [ "deploy::nodejs-undeploy" ],
                    "Shutdown": [ "deploy::nodejs-stop" ]
                }
            }
        });

        let attach_elb = json!({
            "Type": "AWS::OpsWorks::ElasticLoadBalancerAttachment",
            "Properties": {
                "ElasticLoadBalancerName": options.elb_name,
                "LayerId": block.local_ref("layer")?
            }
        });

        let mut app = json!({
            "Type": "AWS::OpsWorks::App",
            "Properties": {
                "Name": options.app_name,
                "StackId": options.stack_id,
                "Type": "nodejs",
                "AppSource": {
                    "Type": "s3",
                    "Url": options.app_url,
                    "Revision": options.app_version
                },
                "Attributes": { "DataSourceType": "None" }
            }
        });

        let source = &mut app["Properties"]["AppSource"];
        if let Some(user_name) = options.app_user_name.as_ref().filter(|v| !v.is_absent()) {
            source["Username"] = user_name.resolve();
        }
        if let Some(password) = options.app_password.as_ref().filter(|v| !v.is_absent()) {
            source["Password"] = password.resolve();
        }

        let mut resources = Resources::new();
        block.insert(&mut resources, "layer", layer)?;
        block.insert(&mut resources, "attachElb", attach_elb)?;
        block.insert(&mut resources, "app", app)?;

        Ok(resources)
    }
}
