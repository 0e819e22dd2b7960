// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for applying manifests and reading Installation status.

pub mod apply;
pub mod status;

pub use apply::{Applier, KubeApplier};
pub use status::{ComponentStatus, InstallationClient};
