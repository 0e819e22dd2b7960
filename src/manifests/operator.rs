// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The js-operator installer bundle: versioned installer YAML plus the image pull secret.

use crate::constants::registry;
use crate::error::Result;
use crate::kubernetes::Applier;
use crate::manifests::pull_secret::image_pull_secret;
use crate::manifests::push_document;
use crate::manifests::versions::{installer_template, latest_version};
use minijinja::{context, Environment};
use std::path::PathBuf;
use tracing::info;

/// Options for rendering the operator installer
#[derive(Debug, Clone, Default)]
pub struct OperatorManifestOptions {
    /// Operator version to install, the latest embedded version when unset or empty
    pub version: Option<String>,
    /// Custom image registry for the operator image, the enterprise registry when unset or empty
    pub image_registry: Option<String>,
    /// Service account key used to pull from the Jetstack Secure registry
    pub credentials: PathBuf,
}

/// Render the installer bundle for the requested version with the image pull secret appended
pub fn render_operator_manifest(options: &OperatorManifestOptions) -> Result<Vec<u8>> {
    let (version, template) = match options.version.as_deref().filter(|v| !v.is_empty()) {
        Some(version) => (version.to_string(), installer_template(version)?),
        None => {
            let latest = latest_version()?;
            let template = installer_template(&latest)?;
            (latest, template)
        }
    };

    info!("Rendering js-operator installer {}", version);

    let secret = image_pull_secret(&options.credentials)?;

    let mut source = String::from(template);
    push_document(&mut source, &serde_yaml::to_string(&secret)?);

    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    let rendered = env.render_str(
        &source,
        context! {
            image_registry => options
                .image_registry
                .as_deref()
                .filter(|r| !r.is_empty())
                .unwrap_or(registry::DEFAULT_IMAGE_REGISTRY),
        },
    )?;

    Ok(rendered.into_bytes())
}

/// Render the installer bundle and hand it to the applier
pub async fn apply_operator_manifest(
    applier: &dyn Applier,
    options: &OperatorManifestOptions,
) -> Result<()> {
    let manifest = render_operator_manifest(options)?;
    applier.apply(&manifest).await
}
