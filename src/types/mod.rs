// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes resource types rendered and read by the installer.

pub mod docker;
pub mod installation;
