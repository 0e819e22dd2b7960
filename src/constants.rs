// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Namespace the operator and its generated secrets live in
pub const NAMESPACE: &str = "jetstack-secure";

/// The field manager name used for server-side apply
pub const FIELD_MANAGER: &str = "jsctl";

/// Name of the singleton Installation resource
pub const INSTALLATION_NAME: &str = "installation";

/// Image pull secret for the Jetstack Secure enterprise registry
pub mod registry {
    /// Name of the generated image pull secret
    pub const PULL_SECRET_NAME: &str = "jse-gcr-creds";
    /// Registry host the pull secret authenticates against
    pub const HOST: &str = "eu.gcr.io";
    /// Registry the operator images are pulled from unless overridden
    pub const DEFAULT_IMAGE_REGISTRY: &str = "eu.gcr.io/jetstack-secure-enterprise";
    /// GCR expects this username when authenticating with a JSON service account key
    pub const USERNAME: &str = "_json_key";
    /// GCR ignores the email, but docker config entries require one
    pub const EMAIL: &str = "auth@jetstack.io";
}

/// cert-manager API constants used in issuer references
pub mod cert_manager {
    pub const GROUP: &str = "cert-manager.io";
    pub const ISSUER_KIND: &str = "Issuer";
}
