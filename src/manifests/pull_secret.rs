// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Image pull secret for the Jetstack Secure enterprise registry

use crate::constants::{registry, NAMESPACE};
use crate::error::{InstallerError, Result};
use crate::types::docker::{DockerConfig, DockerConfigEntry};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

pub const DOCKER_CONFIG_JSON_TYPE: &str = "kubernetes.io/dockerconfigjson";
pub const DOCKER_CONFIG_JSON_KEY: &str = ".dockerconfigjson";

/// Build the image pull secret from a service account key file
pub fn image_pull_secret(key_file: &Path) -> Result<Secret> {
    let key = match std::fs::read(key_file) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(InstallerError::NoKeyFile(key_file.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };

    debug!("Building image pull secret from key file {}", key_file.display());

    let config = DockerConfig::single(
        registry::HOST,
        DockerConfigEntry::new(registry::USERNAME, &key, registry::EMAIL),
    );
    let config_json = serde_json::to_vec(&config)?;

    Ok(Secret {
        metadata: ObjectMeta {
            name: Some(registry::PULL_SECRET_NAME.to_string()),
            namespace: Some(NAMESPACE.to_string()),
            ..Default::default()
        },
        type_: Some(DOCKER_CONFIG_JSON_TYPE.to_string()),
        data: Some(BTreeMap::from([(
            DOCKER_CONFIG_JSON_KEY.to_string(),
            ByteString(config_json),
        )])),
        ..Default::default()
    })
}
