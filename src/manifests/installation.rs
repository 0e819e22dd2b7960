// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The operator's Installation resource and the Secrets it depends on.

use crate::constants::{cert_manager, registry, INSTALLATION_NAME};
use crate::error::Result;
use crate::kubernetes::Applier;
use crate::manifests::pull_secret::image_pull_secret;
use crate::manifests::push_document;
use crate::types::installation::{
    ApproverPolicy, CertManager, CsiDriverCertManager, CsiDriverCertManagerSpiffe, CsiDrivers,
    Installation, InstallationSpec, IssuerReference, IstioCsr, ReplicaConfig, VenafiOauthHelper,
};
use crate::venafi::{IssuerExpander, VenafiIssuer};
use k8s_openapi::api::core::v1::Secret;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options describing which components the operator should install
#[derive(Debug, Clone, Default)]
pub struct InstallationOptions {
    /// Install the cert-manager CSI driver
    pub install_csi_driver: bool,
    /// Install the cert-manager SPIFFE CSI driver
    pub install_spiffe_csi_driver: bool,
    /// Install istio-csr
    pub install_istio_csr: bool,
    /// Install the venafi-oauth-helper
    pub install_venafi_oauth_helper: bool,
    pub venafi_issuers: Vec<VenafiIssuer>,
    /// Issuer istio-csr requests certificates from
    pub istio_csr_issuer: Option<String>,
    /// Custom image registry for operator components
    pub image_registry: Option<String>,
    /// Registry credentials, turned into an image pull secret
    pub credentials: Option<PathBuf>,
    /// Replica count for the cert-manager controller and webhook
    pub cert_manager_replicas: i32,
    pub cert_manager_version: Option<String>,
    pub istio_csr_replicas: i32,
    pub spiffe_csi_driver_replicas: i32,
}

impl InstallationOptions {
    fn credentials(&self) -> Option<&Path> {
        self.credentials
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// The Installation resource together with the Secrets applied alongside it
#[derive(Debug, Clone, PartialEq)]
pub struct InstallationManifests {
    pub installation: Installation,
    pub secrets: Vec<Secret>,
}

impl InstallationManifests {
    fn new(options: &InstallationOptions) -> Self {
        let replicas = ReplicaConfig {
            replica_count: Some(options.cert_manager_replicas),
        };

        let spec = InstallationSpec {
            registry: non_empty(&options.image_registry).map(str::to_string),
            cert_manager: Some(CertManager {
                version: None,
                controller: Some(replicas.clone()),
                webhook: Some(replicas),
            }),
            approver_policy: Some(ApproverPolicy::default()),
            ..Default::default()
        };

        InstallationManifests {
            installation: Installation::new(INSTALLATION_NAME, spec),
            secrets: Vec::new(),
        }
    }

    /// Serialize as a YAML stream: the Installation first, then every Secret in order
    pub fn to_yaml(&self) -> Result<String> {
        let mut stream = serde_yaml::to_string(&self.installation)?;
        for secret in &self.secrets {
            push_document(&mut stream, &serde_yaml::to_string(secret)?);
        }
        Ok(stream)
    }
}

/// Build the Installation resource and its Secrets from the given options
pub fn build_installation_manifests(
    options: &InstallationOptions,
    expander: &dyn IssuerExpander,
) -> Result<InstallationManifests> {
    let mut manifests = InstallationManifests::new(options);
    let spec = &mut manifests.installation.spec;

    apply_cert_manager_version(spec, options);
    apply_csi_drivers(spec, options);
    apply_istio_csr(spec, options);
    apply_venafi_oauth_helper(spec, options);

    if let Some(credentials) = options.credentials() {
        manifests.secrets.push(image_pull_secret(credentials)?);
    }

    generate_venafi_issuer_manifests(&mut manifests, options, expander)?;

    Ok(manifests)
}

/// Build the Installation manifests and serialize them as a YAML stream
pub fn render_installation_manifest(
    options: &InstallationOptions,
    expander: &dyn IssuerExpander,
) -> Result<Vec<u8>> {
    let manifests = build_installation_manifests(options, expander)?;
    info!(
        "Rendering Installation with {} issuer(s) and {} secret(s)",
        manifests.installation.spec.issuers.len(),
        manifests.secrets.len()
    );
    Ok(manifests.to_yaml()?.into_bytes())
}

/// Render the Installation manifests and hand them to the applier
pub async fn apply_installation_manifest(
    applier: &dyn Applier,
    expander: &dyn IssuerExpander,
    options: &InstallationOptions,
) -> Result<()> {
    let manifest = render_installation_manifest(options, expander)?;
    applier.apply(&manifest).await
}

fn apply_cert_manager_version(spec: &mut InstallationSpec, options: &InstallationOptions) {
    let Some(version) = non_empty(&options.cert_manager_version) else {
        return;
    };
    if let Some(cert_manager) = spec.cert_manager.as_mut() {
        cert_manager.version = Some(version.to_string());
    }
}

fn apply_csi_drivers(spec: &mut InstallationSpec, options: &InstallationOptions) {
    if !options.install_csi_driver && !options.install_spiffe_csi_driver {
        return;
    }

    let mut drivers = CsiDrivers::default();
    if options.install_csi_driver {
        drivers.cert_manager = Some(CsiDriverCertManager::default());
    }
    if options.install_spiffe_csi_driver {
        drivers.cert_manager_spiffe = Some(CsiDriverCertManagerSpiffe {
            replica_count: Some(options.spiffe_csi_driver_replicas),
        });
    }

    spec.csi_drivers = Some(drivers);
}

fn apply_istio_csr(spec: &mut InstallationSpec, options: &InstallationOptions) {
    if !options.install_istio_csr {
        return;
    }

    let issuer_ref = non_empty(&options.istio_csr_issuer).map(|name| IssuerReference {
        name: name.to_string(),
        kind: Some(cert_manager::ISSUER_KIND.to_string()),
        group: Some(cert_manager::GROUP.to_string()),
    });

    spec.istio_csr = Some(IstioCsr {
        replica_count: Some(options.istio_csr_replicas),
        issuer_ref,
    });
}

fn apply_venafi_oauth_helper(spec: &mut InstallationSpec, options: &InstallationOptions) {
    if !options.install_venafi_oauth_helper {
        return;
    }

    let image_pull_secrets = match options.credentials() {
        Some(_) => vec![registry::PULL_SECRET_NAME.to_string()],
        None => Vec::new(),
    };

    spec.venafi_oauth_helper = Some(VenafiOauthHelper { image_pull_secrets });
}

fn generate_venafi_issuer_manifests(
    manifests: &mut InstallationManifests,
    options: &InstallationOptions,
    expander: &dyn IssuerExpander,
) -> Result<()> {
    for template in &options.venafi_issuers {
        debug!("Generating manifests for Venafi issuer {}", template.name);
        let (issuer, secret) = expander.expand(template)?;
        manifests.installation.spec.issuers.push(issuer);
        manifests.secrets.push(secret);
    }
    Ok(())
}
