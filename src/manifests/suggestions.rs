// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::manifests::installation::InstallationOptions;
use std::fmt;

/// A follow-up action the user should take after applying an Installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub message: String,
    pub link: Option<String>,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(link) = &self.link {
            write!(f, "\n  {}", link)?;
        }
        Ok(())
    }
}

pub fn suggested_actions(options: &InstallationOptions) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if options.install_istio_csr {
        suggestions.push(Suggestion {
            message: "You can now install Istio and configure it to use istio-csr, follow the link below for examples".to_string(),
            link: Some("https://github.com/cert-manager/istio-csr/tree/main/hack".to_string()),
        });
    }

    suggestions
}
