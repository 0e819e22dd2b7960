// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Venafi issuers the operator creates on behalf of the user.
//!
//! An issuer template expands into an issuer entry on the Installation resource
//! and a Secret holding the credentials that entry refers to.

use crate::constants::NAMESPACE;
use crate::error::{InstallerError, Result};
use crate::types::installation::{
    InstallationIssuer, SecretKeyReference, VenafiCloud, VenafiIssuerConfig, VenafiTpp,
};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TPP_ACCESS_TOKEN_KEY: &str = "access-token";
pub const CLOUD_API_KEY_KEY: &str = "api-key";

/// User-supplied description of a Venafi issuer
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VenafiIssuer {
    pub name: String,
    pub zone: String,
    #[serde(flatten)]
    pub connection: VenafiConnection,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum VenafiConnection {
    /// Venafi Trust Protection Platform
    #[serde(rename_all = "camelCase")]
    Tpp {
        url: String,
        access_token: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ca_bundle: Option<String>,
    },
    /// Venafi as a Service
    #[serde(rename_all = "camelCase")]
    Cloud {
        api_token: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

/// Turns an issuer template into the Installation issuer entry and its credentials Secret
pub trait IssuerExpander {
    fn expand(&self, issuer: &VenafiIssuer) -> Result<(InstallationIssuer, Secret)>;
}

impl<F> IssuerExpander for F
where
    F: Fn(&VenafiIssuer) -> Result<(InstallationIssuer, Secret)>,
{
    fn expand(&self, issuer: &VenafiIssuer) -> Result<(InstallationIssuer, Secret)> {
        self(issuer)
    }
}

/// The default expander, producing cluster scoped Venafi issuers
#[derive(Debug, Clone, Copy, Default)]
pub struct VenafiIssuerExpander;

impl IssuerExpander for VenafiIssuerExpander {
    fn expand(&self, issuer: &VenafiIssuer) -> Result<(InstallationIssuer, Secret)> {
        generate_manifests_for_issuer(issuer)
    }
}

/// Name of the Secret holding an issuer's credentials
pub fn credentials_secret_name(issuer_name: &str) -> String {
    format!("{}-venafi-credentials", issuer_name)
}

pub fn generate_manifests_for_issuer(issuer: &VenafiIssuer) -> Result<(InstallationIssuer, Secret)> {
    require("name", &issuer.name)?;
    require("zone", &issuer.zone)?;

    let secret_name = credentials_secret_name(&issuer.name);

    let (config, key, value) = match &issuer.connection {
        VenafiConnection::Tpp {
            url,
            access_token,
            ca_bundle,
        } => {
            require("url", url)?;
            require("accessToken", access_token)?;
            let config = VenafiIssuerConfig {
                zone: issuer.zone.clone(),
                tpp: Some(VenafiTpp {
                    url: url.clone(),
                    ca_bundle: ca_bundle.clone(),
                    credentials_ref: SecretKeyReference {
                        name: secret_name.clone(),
                        key: None,
                    },
                }),
                cloud: None,
            };
            (config, TPP_ACCESS_TOKEN_KEY, access_token)
        }
        VenafiConnection::Cloud { api_token, url } => {
            require("apiToken", api_token)?;
            let config = VenafiIssuerConfig {
                zone: issuer.zone.clone(),
                tpp: None,
                cloud: Some(VenafiCloud {
                    url: url.clone(),
                    api_token_secret_ref: SecretKeyReference {
                        name: secret_name.clone(),
                        key: Some(CLOUD_API_KEY_KEY.to_string()),
                    },
                }),
            };
            (config, CLOUD_API_KEY_KEY, api_token)
        }
    };

    let fragment = InstallationIssuer {
        name: issuer.name.clone(),
        cluster_scope: true,
        venafi: Some(config),
    };

    let secret = Secret {
        metadata: ObjectMeta {
            name: Some(secret_name),
            namespace: Some(NAMESPACE.to_string()),
            ..Default::default()
        },
        type_: Some("Opaque".to_string()),
        data: Some(BTreeMap::from([(
            key.to_string(),
            ByteString(value.as_bytes().to_vec()),
        )])),
        ..Default::default()
    };

    Ok((fragment, secret))
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InstallerError::IssuerExpansion(format!(
            "Venafi issuer field '{}' must not be empty",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tpp_issuer(name: &str) -> VenafiIssuer {
        VenafiIssuer {
            name: name.to_string(),
            zone: "DevOps\\cert-manager".to_string(),
            connection: VenafiConnection::Tpp {
                url: "https://tpp.example.com/vedsdk".to_string(),
                access_token: "tpp-token".to_string(),
                ca_bundle: None,
            },
        }
    }

    #[test]
    fn test_tpp_issuer_references_generated_secret() {
        let (fragment, secret) = generate_manifests_for_issuer(&tpp_issuer("tpp")).unwrap();

        assert_eq!(fragment.name, "tpp");
        assert!(fragment.cluster_scope);
        let tpp = fragment.venafi.unwrap().tpp.unwrap();
        assert_eq!(tpp.url, "https://tpp.example.com/vedsdk");
        assert_eq!(tpp.credentials_ref.name, "tpp-venafi-credentials");

        assert_eq!(secret.metadata.name.as_deref(), Some("tpp-venafi-credentials"));
        assert_eq!(secret.metadata.namespace.as_deref(), Some("jetstack-secure"));
        assert_eq!(
            secret.data.unwrap()[TPP_ACCESS_TOKEN_KEY].0,
            b"tpp-token".to_vec()
        );
    }

    #[test]
    fn test_cloud_issuer_uses_api_key() {
        let issuer = VenafiIssuer {
            name: "cloud".to_string(),
            zone: "app\\template".to_string(),
            connection: VenafiConnection::Cloud {
                api_token: "cloud-token".to_string(),
                url: None,
            },
        };

        let (fragment, secret) = VenafiIssuerExpander.expand(&issuer).unwrap();

        let config = fragment.venafi.unwrap();
        assert!(config.tpp.is_none());
        let cloud = config.cloud.unwrap();
        assert_eq!(cloud.api_token_secret_ref.key.as_deref(), Some("api-key"));
        assert_eq!(secret.data.unwrap()[CLOUD_API_KEY_KEY].0, b"cloud-token".to_vec());
    }

    #[test]
    fn test_empty_zone_is_rejected() {
        let mut issuer = tpp_issuer("tpp");
        issuer.zone = String::new();

        let err = generate_manifests_for_issuer(&issuer).unwrap_err();
        assert!(matches!(err, InstallerError::IssuerExpansion(msg) if msg.contains("zone")));
    }

    #[test]
    fn test_issuer_template_from_yaml() {
        let yaml = r#"
- name: tpp
  zone: DevOps
  tpp:
    url: https://tpp.example.com/vedsdk
    accessToken: abc
- name: cloud
  zone: app\template
  cloud:
    apiToken: def
"#;
        let issuers: Vec<VenafiIssuer> = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(issuers.len(), 2);
        assert!(matches!(
            &issuers[0].connection,
            VenafiConnection::Tpp { access_token, .. } if access_token == "abc"
        ));
        assert!(matches!(
            &issuers[1].connection,
            VenafiConnection::Cloud { api_token, url: None } if api_token == "def"
        ));
    }
}
