// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Installer YAML for every supported js-operator version, compiled into the binary.
//!
//! Each installer is a template: the operator image is prefixed with
//! `{{ image_registry }}` so a custom registry can be substituted at render time.
//! To add a version, drop the full installer into `installers/` and register it below.

use crate::error::{InstallerError, Result};
use semver::Version;

static INSTALLERS: &[(&str, &str)] = &[
    ("v0.0.1-alpha.9.yaml", include_str!("installers/v0.0.1-alpha.9.yaml")),
    ("v0.0.1-alpha.10.yaml", include_str!("installers/v0.0.1-alpha.10.yaml")),
    ("v0.1.0.yaml", include_str!("installers/v0.1.0.yaml")),
];

const EXTENSION: &str = ".yaml";

/// All available operator versions, ordered semantically and prefixed with `v`
pub fn versions() -> Result<Vec<String>> {
    sort_versions(INSTALLERS.iter().map(|(name, _)| *name))
}

/// Parse installer file names as semantic versions and sort them ascending
pub fn sort_versions<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Vec<String>> {
    let mut parsed = names
        .into_iter()
        .map(|name| {
            let raw = name.strip_suffix(EXTENSION).unwrap_or(name);
            Version::parse(raw.strip_prefix('v').unwrap_or(raw))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    parsed.sort();

    Ok(parsed.iter().map(|v| format!("v{}", v)).collect())
}

/// The highest available operator version
pub fn latest_version() -> Result<String> {
    versions()?
        .pop()
        .ok_or_else(|| InstallerError::NoManifest("latest".to_string()))
}

/// Look up the installer template for an exact version, with or without the leading `v`
pub fn installer_template(version: &str) -> Result<&'static str> {
    let name = if version.starts_with('v') {
        format!("{}{}", version, EXTENSION)
    } else {
        format!("v{}{}", version, EXTENSION)
    };

    INSTALLERS
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, contents)| *contents)
        .ok_or_else(|| InstallerError::NoManifest(version.to_string()))
}
