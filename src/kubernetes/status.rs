// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Component readiness reported by the Installation resource

use crate::constants::INSTALLATION_NAME;
use crate::error::{InstallerError, Result};
use crate::types::installation::{conditions, Installation};
use kube::{Api, Client};
use serde::Serialize;
use tracing::{debug, instrument};

/// Friendly component names for the condition types we report on.
/// Conditions with a type missing here are left out of the status.
const COMPONENT_NAMES: &[(&str, &str)] = &[
    (conditions::CERT_MANAGER_READY, "cert-manager"),
    (conditions::CERT_MANAGER_ISSUERS_READY, "issuers"),
    (conditions::CSI_DRIVERS_READY, "csi-driver"),
    (conditions::ISTIO_CSR_READY, "istio-csr"),
    (conditions::APPROVER_POLICY_READY, "approver-policy"),
    (conditions::VENAFI_OAUTH_HELPER_READY, "venafi-oauth-helper"),
    (conditions::MANIFESTS_READY, "manifests"),
];

/// Status of an individual operator component
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ComponentStatus {
    pub name: String,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Queries the Installation resource of a cluster
pub struct InstallationClient {
    api: Api<Installation>,
}

impl InstallationClient {
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }

    /// Component statuses ordered by name, `NoInstallation` if the resource does not exist
    #[instrument(skip(self))]
    pub async fn status(&self) -> Result<Vec<ComponentStatus>> {
        let installation = match self.api.get(INSTALLATION_NAME).await {
            Ok(installation) => installation,
            Err(kube::Error::Api(err)) if err.code == 404 => {
                return Err(InstallerError::NoInstallation)
            }
            Err(e) => return Err(e.into()),
        };

        Ok(component_statuses(&installation))
    }
}

fn component_name(condition_type: &str) -> Option<&'static str> {
    COMPONENT_NAMES
        .iter()
        .find(|(t, _)| *t == condition_type)
        .map(|(_, name)| *name)
}

/// Map the Installation's conditions to component statuses
pub fn component_statuses(installation: &Installation) -> Vec<ComponentStatus> {
    let Some(status) = installation.status.as_ref() else {
        return Vec::new();
    };

    let mut statuses: Vec<ComponentStatus> = status
        .conditions
        .iter()
        .filter_map(|condition| {
            let Some(name) = component_name(&condition.condition_type) else {
                debug!("Skipping unknown condition type {}", condition.condition_type);
                return None;
            };
            let ready = condition.is_true();
            Some(ComponentStatus {
                name: name.to_string(),
                ready,
                message: if ready {
                    None
                } else {
                    condition.message.clone().filter(|m| !m.is_empty())
                },
            })
        })
        .collect();

    statuses.sort_by(|a, b| a.name.cmp(&b.name));
    statuses
}
