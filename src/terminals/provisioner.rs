// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! Ordered, idempotent installation of the terminal backend.

use crate::constants::NAMESPACE;
use crate::error::{Result, TerminalsError};
use crate::kubernetes::{create_if_absent, CreateOutcome};
use crate::manifests;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment};
use k8s_openapi::api::core::v1::{Namespace, Service, ServiceAccount};
use k8s_openapi::api::rbac::v1::ClusterRoleBinding;
use kube::{Api, Client};
use std::fmt;
use tracing::{info, instrument};

/// One create call of the install sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Namespace,
    ServiceAccount,
    ClusterRoleBinding,
    DaemonSet,
    Deployment,
    Service,
}

impl Step {
    /// Namespaced objects follow the namespace, and the service account
    /// precedes both its binding and the workloads that run under it.
    pub const ORDER: [Step; 6] = [
        Step::Namespace,
        Step::ServiceAccount,
        Step::ClusterRoleBinding,
        Step::DaemonSet,
        Step::Deployment,
        Step::Service,
    ];
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Namespace => "Namespace",
            Step::ServiceAccount => "ServiceAccount",
            Step::ClusterRoleBinding => "ClusterRoleBinding",
            Step::DaemonSet => "DaemonSet",
            Step::Deployment => "Deployment",
            Step::Service => "Service",
        };
        f.write_str(name)
    }
}

/// Outcome of every step of a completed install
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    pub steps: Vec<(Step, CreateOutcome)>,
}

impl ProvisionReport {
    pub fn created(&self) -> usize {
        self.steps
            .iter()
            .filter(|(_, outcome)| *outcome == CreateOutcome::Created)
            .count()
    }

    pub fn already_present(&self) -> usize {
        self.steps.len() - self.created()
    }
}

pub struct Provisioner {
    client: Client,
}

impl Provisioner {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create every resource in [`Step::ORDER`], one at a time.
    ///
    /// Objects that already exist count as done. The first other failure
    /// stops the sequence and is returned together with its step.
    #[instrument(skip(self))]
    pub async fn run(&self, image: &str) -> Result<ProvisionReport> {
        let mut report = ProvisionReport::default();

        for step in Step::ORDER {
            let outcome = self
                .apply(step, image)
                .await
                .map_err(|source| TerminalsError::ProvisionError { step, source })?;
            report.steps.push((step, outcome));
        }

        info!(
            "Install finished: {} created, {} already present",
            report.created(),
            report.already_present()
        );
        Ok(report)
    }

    async fn apply(&self, step: Step, image: &str) -> std::result::Result<CreateOutcome, kube::Error> {
        let client = self.client.clone();
        match step {
            Step::Namespace => {
                let api: Api<Namespace> = Api::all(client);
                create_if_absent(&api, &manifests::namespace()).await
            }
            Step::ServiceAccount => {
                let api: Api<ServiceAccount> = Api::namespaced(client, NAMESPACE);
                create_if_absent(&api, &manifests::service_account()).await
            }
            Step::ClusterRoleBinding => {
                let api: Api<ClusterRoleBinding> = Api::all(client);
                create_if_absent(&api, &manifests::cluster_role_binding()).await
            }
            Step::DaemonSet => {
                let api: Api<DaemonSet> = Api::namespaced(client, NAMESPACE);
                create_if_absent(&api, &manifests::node_shell_daemon_set(image)).await
            }
            Step::Deployment => {
                let api: Api<Deployment> = Api::namespaced(client, NAMESPACE);
                create_if_absent(&api, &manifests::kubectl_shell_deployment(image)).await
            }
            Step::Service => {
                let api: Api<Service> = Api::namespaced(client, NAMESPACE);
                create_if_absent(&api, &manifests::kubectl_shell_service()).await
            }
        }
    }
}
