// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Applying YAML streams to a cluster

use crate::constants::FIELD_MANAGER;
use crate::error::{InstallerError, Result};
use async_trait::async_trait;
use kube::{
    api::{DynamicObject, GroupVersionKind, Patch, PatchParams},
    discovery::{Discovery, Scope},
    Api, Client, ResourceExt,
};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// Applies a stream of `---` separated YAML documents to a cluster
#[async_trait]
pub trait Applier: Send + Sync {
    async fn apply(&self, manifests: &[u8]) -> Result<()>;
}

/// Server-side applies every document through the Kubernetes API
pub struct KubeApplier {
    client: Client,
}

impl KubeApplier {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn apply_document(&self, discovery: &Discovery, obj: &DynamicObject) -> Result<()> {
        let types = obj.types.as_ref().ok_or_else(|| {
            InstallerError::Apply("document is missing apiVersion or kind".to_string())
        })?;
        let name = obj.metadata.name.as_deref().ok_or_else(|| {
            InstallerError::Apply(format!("{} is missing metadata.name", types.kind))
        })?;

        let (group, version) = types
            .api_version
            .split_once('/')
            .unwrap_or(("", types.api_version.as_str()));
        let gvk = GroupVersionKind::gvk(group, version, &types.kind);

        let (resource, capabilities) = discovery.resolve_gvk(&gvk).ok_or_else(|| {
            InstallerError::Apply(format!(
                "unknown resource type {}/{}",
                types.api_version, types.kind
            ))
        })?;

        let api: Api<DynamicObject> = match capabilities.scope {
            Scope::Namespaced => Api::namespaced_with(
                self.client.clone(),
                obj.metadata.namespace.as_deref().unwrap_or("default"),
                &resource,
            ),
            Scope::Cluster => Api::all_with(self.client.clone(), &resource),
        };

        let params = PatchParams::apply(FIELD_MANAGER).force();
        api.patch(name, &params, &Patch::Apply(obj)).await?;

        debug!(kind = %types.kind, name = %name, namespace = ?obj.namespace(), "Applied manifest");
        Ok(())
    }
}

#[async_trait]
impl Applier for KubeApplier {
    #[instrument(skip_all)]
    async fn apply(&self, manifests: &[u8]) -> Result<()> {
        let (foundational, rest): (Vec<_>, Vec<_>) =
            parse_documents(manifests)?.into_iter().partition(is_foundational);

        info!("Applying {} manifest(s)", foundational.len() + rest.len());

        // Discovery runs again after Namespaces and CRDs so new kinds resolve
        for batch in [foundational, rest] {
            if batch.is_empty() {
                continue;
            }
            let discovery = Discovery::new(self.client.clone()).run().await?;
            for obj in &batch {
                self.apply_document(&discovery, obj).await?;
            }
        }

        Ok(())
    }
}

/// Split a YAML stream into objects, skipping empty documents
pub fn parse_documents(manifests: &[u8]) -> Result<Vec<DynamicObject>> {
    let mut objects = Vec::new();
    for document in serde_yaml::Deserializer::from_slice(manifests) {
        let value = serde_yaml::Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }
        objects.push(serde_yaml::from_value(value)?);
    }
    Ok(objects)
}

fn is_foundational(obj: &DynamicObject) -> bool {
    obj.types
        .as_ref()
        .is_some_and(|t| t.kind == "Namespace" || t.kind == "CustomResourceDefinition")
}
