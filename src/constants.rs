// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

/// Namespace holding every terminal backend resource
pub const NAMESPACE: &str = "kubexm-terminals";

/// Field manager recorded on created objects
pub const FIELD_MANAGER: &str = "kubexm-terminals";

/// Image used when neither the environment nor the command line names one
pub const DEFAULT_TERMINAL_IMAGE: &str =
    "registry.dev.rdev.tech:18093/headlamp/universal-toolkit:1.0";

/// Names of the provisioned resources
pub mod names {
    pub const SERVICE_ACCOUNT: &str = "ops-ui-admin-sa";
    pub const CLUSTER_ROLE_BINDING: &str = "ops-ui-admin-binding";
    /// The role granted to the service account
    pub const CLUSTER_ROLE: &str = "cluster-admin";
    pub const NODE_SHELL_DAEMONSET: &str = "node-shell-ds";
    pub const NODE_SHELL_CONTAINER: &str = "node-shell-container";
    /// Its presence is what marks the backend as installed
    pub const KUBECTL_SHELL_DEPLOYMENT: &str = "kubectl-shell-deployment";
    pub const KUBECTL_SHELL_CONTAINER: &str = "kubectl-shell-container";
    pub const KUBECTL_SHELL_SERVICE: &str = "kubectl-shell-svc";
}

/// Pod selector labels
pub mod labels {
    pub const APP: &str = "app";
    pub const NODE_SHELL: &str = "node-shell";
    pub const KUBECTL_SHELL: &str = "kubectl-shell";
}

/// Terminal ports
pub mod ports {
    /// ttyd on every node, bound on the host network
    pub const NODE_SHELL: i32 = 7681;
    /// ttyd inside the kubectl-shell pod
    pub const KUBECTL_SHELL: i32 = 7682;
    pub const KUBECTL_SHELL_SERVICE: i32 = 80;
    /// Node port exposing the kubectl shell on every node
    pub const KUBECTL_SHELL_NODE_PORT: i32 = 30082;
}

/// Environment variables read by [`crate::config::Config`]
pub mod env {
    pub const TERMINAL_IMAGE: &str = "KUBEXM_TERMINAL_IMAGE";
    pub const CONSOLE_HOST: &str = "KUBEXM_CONSOLE_HOST";
    pub const ROWS_PER_PAGE: &str = "KUBEXM_ROWS_PER_PAGE";
}

/// Rollout wait configuration
pub mod rollout {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
}
