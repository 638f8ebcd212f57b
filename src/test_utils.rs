// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

#[derive(Clone)]
enum MockResponse {
    Json { status: u16, body: String },
    /// Answer with the request body, the way the API server returns a created object
    Echo { status: u16 },
}

/// A mock HTTP service that returns predefined responses based on request paths
/// and records every request it receives.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), VecDeque<MockResponse>>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn on(self, method: &str, path: &str, response: MockResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), VecDeque::from([response]));
        self
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on(
            "GET",
            path,
            MockResponse::Json {
                status,
                body: body.to_string(),
            },
        )
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on(
            "POST",
            path,
            MockResponse::Json {
                status,
                body: body.to_string(),
            },
        )
    }

    /// Queue a further GET response for the path, served once the earlier ones are used up
    pub fn then_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(("GET".to_string(), path.to_string()))
            .or_default()
            .push_back(MockResponse::Json {
                status,
                body: body.to_string(),
            });
        self
    }

    /// Accept POST requests to the path with 201 and echo the submitted object
    pub fn on_post_echo(self, path: &str) -> Self {
        self.on("POST", path, MockResponse::Echo { status: 201 })
    }

    /// Every (method, path) received so far, in arrival order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Only the paths of the POST requests received so far
    pub fn posted_paths(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|(method, _)| method == "POST")
            .map(|(_, path)| path)
            .collect()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Queued responses are consumed in order; the last one is repeated
    fn find_response(&self, method: &str, path: &str) -> Option<MockResponse> {
        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&(method.to_string(), path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), path.clone()));
        let response = self.find_response(&method, &path);

        Box::pin(async move {
            let (status, body) = match response {
                Some(MockResponse::Json { status, body }) => (status, body.into_bytes()),
                Some(MockResponse::Echo { status }) => {
                    let bytes = req.into_body().collect().await?.to_bytes();
                    (status, bytes.to_vec())
                }
                // Default 404 for unmatched requests
                None => (404, not_found_json("resource", &path).into_bytes()),
            };

            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap())
        })
    }
}

fn status_json(code: u16, reason: &str, message: String) -> String {
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

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(404, "NotFound", format!("{} \"{}\" not found", resource, name))
}

/// Create a 409 already exists response
pub fn already_exists_json(resource: &str, name: &str) -> String {
    status_json(
        409,
        "AlreadyExists",
        format!("{} \"{}\" already exists", resource, name),
    )
}

/// Create a 403 forbidden response
pub fn forbidden_json(resource: &str) -> String {
    status_json(
        403,
        "Forbidden",
        format!(
            "{} is forbidden: User \"system:anonymous\" cannot create resource",
            resource
        ),
    )
}

/// Create a node JSON object with the given (type, address) pairs
pub fn node_json(name: &str, addresses: &[(&str, &str)]) -> serde_json::Value {
    let addresses: Vec<serde_json::Value> = addresses
        .iter()
        .map(|(kind, address)| serde_json::json!({ "type": kind, "address": address }))
        .collect();

    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Node",
        "metadata": {
            "name": name,
            "uid": format!("uid-{}", name)
        },
        "status": {
            "addresses": addresses,
            "nodeInfo": {
                "architecture": "amd64",
                "bootID": "",
                "containerRuntimeVersion": "containerd://1.7.0",
                "kernelVersion": "6.1.0",
                "kubeProxyVersion": "v1.30.0",
                "kubeletVersion": "v1.30.0",
                "machineID": "",
                "operatingSystem": "linux",
                "osImage": "Ubuntu 22.04.4 LTS",
                "systemUUID": ""
            }
        }
    })
}

/// Create a node list response
pub fn node_list_json(nodes: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "NodeList",
        "metadata": { "resourceVersion": "1" },
        "items": nodes
    })
    .to_string()
}
