// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contents of a `kubernetes.io/dockerconfigjson` secret
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DockerConfig {
    pub auths: BTreeMap<String, DockerConfigEntry>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DockerConfigEntry {
    pub username: String,
    pub password: String,
    pub email: String,
    pub auth: String,
}

impl DockerConfigEntry {
    /// Build an entry the way `kubectl create secret docker-registry` does
    pub fn new(username: &str, password: &str, email: &str) -> Self {
        DockerConfigEntry {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            auth: STANDARD.encode(format!("{}:{}", username, password)),
        }
    }
}

impl DockerConfig {
    pub fn single(host: &str, entry: DockerConfigEntry) -> Self {
        DockerConfig {
            auths: BTreeMap::from([(host.to_string(), entry)]),
        }
    }
}
