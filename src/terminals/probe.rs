// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! Checks whether the terminal backend is installed.

use crate::constants::{names, NAMESPACE};
use crate::error::ApiErrorKind;
use k8s_openapi::api::apps::v1::Deployment;
use kube::{Api, Client};
use tracing::{debug, instrument, warn};

/// Result of a readiness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    /// The kubectl shell deployment does not exist
    NotInstalled,
    /// The check itself failed; treated as not ready
    CheckFailed(String),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Readiness::CheckFailed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Look up the kubectl shell deployment. No retries; callers re-probe when they need fresh state.
#[instrument(skip(client))]
pub async fn probe_readiness(client: &Client) -> Readiness {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), NAMESPACE);

    match deployments.get(names::KUBECTL_SHELL_DEPLOYMENT).await {
        Ok(_) => {
            debug!("Deployment {}/{} found", NAMESPACE, names::KUBECTL_SHELL_DEPLOYMENT);
            Readiness::Ready
        }
        Err(e) if ApiErrorKind::classify(&e) == ApiErrorKind::NotFound => {
            debug!("Deployment {}/{} not found", NAMESPACE, names::KUBECTL_SHELL_DEPLOYMENT);
            Readiness::NotInstalled
        }
        Err(e) => {
            warn!("Failed to check terminal resources: {}", e);
            Readiness::CheckFailed(format!("Failed to check terminal resources: {}", e))
        }
    }
}
