// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses and capturing applied manifests.

use crate::error::Result;
use crate::kubernetes::Applier;
use async_trait::async_trait;
use http::{Method, Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses per method and path,
/// recording every request it receives.
/// Unmatched requests get a 404 NotFound status.
#[derive(Clone, Default)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(Method, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<(Method, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on(Method::GET, path, status, body)
    }

    /// Add a response for PATCH requests matching the exact path
    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on(Method::PATCH, path, status, body)
    }

    fn on(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method, path.to_string()), (status, body.to_string()));
        self
    }

    /// Serve API discovery for the core `v1` group and `operator.jetstack.io/v1alpha1`
    pub fn with_discovery(self) -> Self {
        self.on_get("/api", 200, &api_versions_json())
            .on_get("/api/v1", 200, &core_resources_json())
            .on_get("/apis", 200, &api_groups_json())
            .on_get(
                "/apis/operator.jetstack.io/v1alpha1",
                200,
                &operator_resources_json(),
            )
    }

    /// Requests received so far as `(method, path?query)`
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Paths and queries of the PATCH requests received so far, in order
    pub fn patches(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|(method, _)| method == Method::PATCH)
            .map(|(_, uri)| uri)
            .collect()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let uri = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| req.uri().path().to_string());
        self.requests
            .lock()
            .unwrap()
            .push((req.method().clone(), uri));

        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&(req.method().clone(), req.uri().path().to_string()))
            .cloned();

        let (status, body) =
            response.unwrap_or_else(|| (404, status_json(404, "NotFound", "not found")));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

fn api_resource(name: &str, singular: &str, kind: &str, namespaced: bool) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "singularName": singular,
        "namespaced": namespaced,
        "kind": kind,
        "verbs": ["get", "list", "create", "update", "patch", "delete"]
    })
}

fn api_versions_json() -> String {
    serde_json::json!({
        "kind": "APIVersions",
        "versions": ["v1"],
        "serverAddressByClientCIDRs": []
    })
    .to_string()
}

fn core_resources_json() -> String {
    serde_json::json!({
        "kind": "APIResourceList",
        "groupVersion": "v1",
        "resources": [
            api_resource("namespaces", "namespace", "Namespace", false),
            api_resource("secrets", "secret", "Secret", true)
        ]
    })
    .to_string()
}

fn api_groups_json() -> String {
    let version = serde_json::json!({
        "groupVersion": "operator.jetstack.io/v1alpha1",
        "version": "v1alpha1"
    });
    serde_json::json!({
        "kind": "APIGroupList",
        "groups": [{
            "name": "operator.jetstack.io",
            "versions": [version.clone()],
            "preferredVersion": version
        }]
    })
    .to_string()
}

fn operator_resources_json() -> String {
    serde_json::json!({
        "kind": "APIResourceList",
        "groupVersion": "operator.jetstack.io/v1alpha1",
        "resources": [
            api_resource("installations", "installation", "Installation", false)
        ]
    })
    .to_string()
}

/// The object a server-side apply returns
pub fn applied_object_json(api_version: &str, kind: &str, name: &str) -> String {
    serde_json::json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": {
            "name": name
        }
    })
    .to_string()
}

/// An Installation resource carrying the given status conditions
pub fn installation_json(conditions: serde_json::Value) -> String {
    serde_json::json!({
        "apiVersion": "operator.jetstack.io/v1alpha1",
        "kind": "Installation",
        "metadata": {
            "name": "installation",
            "uid": "test-uid"
        },
        "spec": {
            "approverPolicy": {}
        },
        "status": {
            "conditions": conditions
        }
    })
    .to_string()
}

/// A Kubernetes Status failure response
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// A temporary key file with the given contents
pub fn key_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// An applier that records every stream it is given
#[derive(Default)]
pub struct RecordingApplier {
    applied: Mutex<Vec<Vec<u8>>>,
}

impl RecordingApplier {
    pub fn applied(&self) -> Vec<Vec<u8>> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl Applier for RecordingApplier {
    async fn apply(&self, manifests: &[u8]) -> Result<()> {
        self.applied.lock().unwrap().push(manifests.to_vec());
        Ok(())
    }
}
