// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::env;
use std::path::PathBuf;

/// Installer defaults loaded from environment variables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Custom image registry for the operator and its components
    pub image_registry: Option<String>,
    /// Path to the registry service account key
    pub credentials: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Config {
            image_registry: non_empty("JSCTL_IMAGE_REGISTRY"),
            credentials: non_empty("JSCTL_CREDENTIALS").map(PathBuf::from),
        }
    }
}
