// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! The console page: the one caller of the prober and the provisioner.

use super::{terminal_url, ConsoleState};
use crate::constants::ports;
use crate::error::{Result, TerminalsError};
use crate::kubernetes::ClusterConnection;
use crate::nodes::{list_nodes, NodeSummary};
use crate::terminals::{probe_readiness, ProvisionReport, Provisioner};
use kube::Client;
use tracing::{error, info, instrument};
use url::Url;

pub struct ConsolePage {
    connection: ClusterConnection,
    /// Overrides the API server host in the kubectl console link
    console_host: Option<String>,
    state: ConsoleState,
}

impl ConsolePage {
    pub fn new(connection: ClusterConnection, console_host: Option<String>) -> Self {
        Self {
            connection,
            console_host,
            state: ConsoleState::Unknown,
        }
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn client(&self) -> &Client {
        &self.connection.client
    }

    /// Re-check whether the backend is installed
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<&ConsoleState> {
        let readiness = probe_readiness(&self.connection.client).await;
        self.state = self.state.probed(readiness)?;
        info!("Terminal backend is {}", self.state);
        Ok(&self.state)
    }

    /// Install (or repair) the backend, then re-check it.
    ///
    /// Only allowed while the backend is not ready. The returned error is also
    /// kept in the page state.
    #[instrument(skip(self))]
    pub async fn install(&mut self, image: &str) -> Result<ProvisionReport> {
        if self.state == ConsoleState::Unknown {
            self.refresh().await?;
        }
        self.state = self.state.begin_install()?;

        let provisioner = Provisioner::new(self.connection.client.clone());
        match provisioner.run(image).await {
            Ok(report) => {
                let readiness = probe_readiness(&self.connection.client).await;
                self.state = self.state.finish_install(Ok(readiness))?;
                info!("Terminal backend is {} after install", self.state);
                Ok(report)
            }
            Err(e) => {
                error!("{}", e);
                self.state = self.state.finish_install(Err(e.to_string()))?;
                Err(e)
            }
        }
    }

    /// Install unless the backend is already ready; `None` when nothing was done
    #[instrument(skip(self))]
    pub async fn install_if_missing(&mut self, image: &str) -> Result<Option<ProvisionReport>> {
        if self.state == ConsoleState::Unknown {
            self.refresh().await?;
        }
        if self.state.is_ready() {
            info!("Terminal backend is already installed");
            return Ok(None);
        }
        if image.trim().is_empty() {
            return Err(TerminalsError::EmptyImage);
        }

        info!("Installing terminal backend with image {}", image);
        self.install(image).await.map(Some)
    }

    /// Ok only when the last check found the backend ready
    pub fn ensure_ready(&self) -> Result<()> {
        if self.state.is_ready() {
            return Ok(());
        }
        match self.state.error() {
            Some(error) => Err(TerminalsError::NotReady(error.to_string())),
            None => Err(TerminalsError::NotInstalled),
        }
    }

    /// Nodes with their shell links. The backend must be ready.
    pub async fn nodes(&self) -> Result<Vec<NodeSummary>> {
        self.ensure_ready()?;
        list_nodes(&self.connection.client).await
    }

    /// Link to the cluster-wide kubectl shell, reachable through the node port on any node
    pub fn kubectl_console_url(&self) -> Result<Url> {
        let host = self
            .console_host
            .as_deref()
            .or(self.connection.api_host.as_deref())
            .ok_or_else(|| {
                TerminalsError::InvalidAddress(
                    "no console host configured and the API server host is unknown".to_string(),
                )
            })?;
        terminal_url(host, ports::KUBECTL_SHELL_NODE_PORT)
    }
}
