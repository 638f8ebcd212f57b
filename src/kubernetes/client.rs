// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! Client creation from the local kubeconfig or the in-cluster environment

use crate::error::{Result, TerminalsError};
use kube::{config::KubeConfigOptions, Client, Config as KConfig};
use tracing::{debug, info, instrument};

/// A client together with the host of the API server it talks to
#[derive(Clone)]
pub struct ClusterConnection {
    pub client: Client,
    /// Host part of the API server URL, the fallback host for the kubectl console
    pub api_host: Option<String>,
}

impl ClusterConnection {
    pub fn new(client: Client, api_host: Option<String>) -> Self {
        Self { client, api_host }
    }
}

/// Connect using the given kubeconfig context, or infer the configuration when none is named
#[instrument]
pub async fn connect(context: Option<&str>) -> Result<ClusterConnection> {
    let config = match context {
        Some(context) => {
            let options = KubeConfigOptions {
                context: Some(context.to_string()),
                ..Default::default()
            };
            KConfig::from_kubeconfig(&options).await.map_err(|e| {
                TerminalsError::KubeconfigError(format!(
                    "Failed to load context {}: {}",
                    context, e
                ))
            })?
        }
        None => KConfig::infer()
            .await
            .map_err(|e| TerminalsError::KubeconfigError(format!("Failed to infer config: {}", e)))?,
    };

    let api_host = config.cluster_url.host().map(str::to_string);
    debug!("Using API server {}", config.cluster_url);

    let client = Client::try_from(config)
        .map_err(|e| TerminalsError::KubeconfigError(format!("Failed to create client: {}", e)))?;
    info!("Connected to Kubernetes cluster");

    Ok(ClusterConnection::new(client, api_host))
}
