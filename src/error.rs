// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallerError {
    #[error("no manifest for operator version {0}")]
    NoManifest(String),

    #[error("no key file at {}", .0.display())]
    NoKeyFile(PathBuf),

    #[error("no installation")]
    NoInstallation,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Invalid installer version: {0}")]
    Version(#[from] semver::Error),

    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to generate issuer manifests: {0}")]
    IssuerExpansion(String),

    #[error("Failed to apply manifests: {0}")]
    Apply(String),
}

pub type Result<T> = std::result::Result<T, InstallerError>;
