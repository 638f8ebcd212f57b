// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! Waiting for the kubectl shell to come up after an install

use crate::constants::{names, NAMESPACE};
use crate::error::{Result, TerminalsError};
use k8s_openapi::api::apps::v1::Deployment;
use kube::runtime::wait::await_condition;
use kube::{Api, Client};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, instrument};

/// True once the deployment reports at least one available replica
pub fn has_available_replica(deployment: Option<&Deployment>) -> bool {
    deployment
        .and_then(|d| d.status.as_ref())
        .and_then(|s| s.available_replicas)
        .is_some_and(|n| n >= 1)
}

/// Wait until the kubectl shell deployment has an available replica
#[instrument(skip(client))]
pub async fn wait_for_kubectl_shell(client: &Client, limit: Duration) -> Result<()> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), NAMESPACE);

    info!(
        "Waiting up to {:?} for {}/{} to become available...",
        limit,
        NAMESPACE,
        names::KUBECTL_SHELL_DEPLOYMENT
    );

    let condition = await_condition(
        deployments,
        names::KUBECTL_SHELL_DEPLOYMENT,
        has_available_replica,
    );

    match timeout(limit, condition).await {
        Ok(Ok(_)) => {
            info!("kubectl shell is available");
            Ok(())
        }
        Ok(Err(e)) => Err(TerminalsError::WatchError(format!(
            "{}/{}: {}",
            NAMESPACE,
            names::KUBECTL_SHELL_DEPLOYMENT,
            e
        ))),
        Err(_) => Err(TerminalsError::RolloutTimeout(limit)),
    }
}
