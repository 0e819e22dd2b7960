// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Desired state of the js-operator: which cert-manager components it installs and how.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "operator.jetstack.io", version = "v1alpha1", kind = "Installation")]
#[kube(status = "InstallationStatus", derive = "PartialEq")]
#[serde(rename_all = "camelCase")]
pub struct InstallationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_manager: Option<CertManager>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csi_drivers: Option<CsiDrivers>,
    #[serde(default, rename = "istioCSR", skip_serializing_if = "Option::is_none")]
    pub istio_csr: Option<IstioCsr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_policy: Option<ApproverPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venafi_oauth_helper: Option<VenafiOauthHelper>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issuers: Vec<InstallationIssuer>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertManager {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ReplicaConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<ReplicaConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_count: Option<i32>,
}

/// The admission webhook rejects an empty `csiDrivers` object, so it must carry at least one driver.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CsiDrivers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_manager: Option<CsiDriverCertManager>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_manager_spiffe: Option<CsiDriverCertManagerSpiffe>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct CsiDriverCertManager {}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CsiDriverCertManagerSpiffe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_count: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IstioCsr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_ref: Option<IssuerReference>,
}

/// Reference to a cert-manager issuer
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuerReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct ApproverPolicy {}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VenafiOauthHelper {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_pull_secrets: Vec<String>,
}

/// An issuer the operator creates on behalf of the user
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstallationIssuer {
    pub name: String,
    #[serde(default)]
    pub cluster_scope: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venafi: Option<VenafiIssuerConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VenafiIssuerConfig {
    pub zone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tpp: Option<VenafiTpp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud: Option<VenafiCloud>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VenafiTpp {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<String>,
    pub credentials_ref: SecretKeyReference,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VenafiCloud {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub api_token_secret_ref: SecretKeyReference,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeyReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstallationStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<InstallationCondition>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstallationCondition {
    #[serde(rename = "type")]
    pub condition_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

impl InstallationCondition {
    pub fn is_true(&self) -> bool {
        self.status == conditions::STATUS_TRUE
    }
}

/// Condition types reported on `Installation.status.conditions`
pub mod conditions {
    pub const CERT_MANAGER_READY: &str = "CertManagerReady";
    pub const CERT_MANAGER_ISSUERS_READY: &str = "CertManagerIssuersReady";
    pub const CSI_DRIVERS_READY: &str = "CSIDriversReady";
    pub const ISTIO_CSR_READY: &str = "IstioCSRReady";
    pub const APPROVER_POLICY_READY: &str = "ApproverPolicyReady";
    pub const VENAFI_OAUTH_HELPER_READY: &str = "VenafiOauthHelperReady";
    pub const MANIFESTS_READY: &str = "ManifestsReady";

    pub const STATUS_TRUE: &str = "True";
}
