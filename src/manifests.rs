// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! Manifests of the terminal backend resources.
//!
//! Every field is fixed except the container image of the two workloads.

use crate::constants::{labels, names, ports, NAMESPACE};
use k8s_openapi::api::apps::v1::{DaemonSet, DaemonSetSpec, Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, HostPathVolumeSource, Namespace, PodSpec, PodTemplateSpec,
    SecurityContext, Service, ServiceAccount, ServicePort, ServiceSpec, Toleration, Volume,
    VolumeMount,
};
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, RoleRef, Subject};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

const RBAC_API_GROUP: &str = "rbac.authorization.k8s.io";
const HOST_ROOT_VOLUME: &str = "host-root";

/// Enters every namespace of the host's PID 1 so the shell behaves like a root login on the node
const NODE_SHELL_SCRIPT: &str = "exec /usr/bin/ttyd --writable -p 7681 /usr/bin/nsenter --target 1 --mount --uts --ipc --net --pid /bin/bash";

fn app_labels(app: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(labels::APP.to_string(), app.to_string())])
}

fn namespaced_meta(name: &str, labels: Option<BTreeMap<String, String>>) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some(NAMESPACE.to_string()),
        labels,
        ..Default::default()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn namespace() -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(NAMESPACE.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn service_account() -> ServiceAccount {
    ServiceAccount {
        metadata: namespaced_meta(names::SERVICE_ACCOUNT, None),
        ..Default::default()
    }
}

/// Binds the terminal service account to `cluster-admin`
pub fn cluster_role_binding() -> ClusterRoleBinding {
    ClusterRoleBinding {
        metadata: ObjectMeta {
            name: Some(names::CLUSTER_ROLE_BINDING.to_string()),
            ..Default::default()
        },
        role_ref: RoleRef {
            api_group: RBAC_API_GROUP.to_string(),
            kind: "ClusterRole".to_string(),
            name: names::CLUSTER_ROLE.to_string(),
        },
        subjects: Some(vec![Subject {
            kind: "ServiceAccount".to_string(),
            name: names::SERVICE_ACCOUNT.to_string(),
            namespace: Some(NAMESPACE.to_string()),
            ..Default::default()
        }]),
    }
}

/// Privileged host-network shell on every node, served on the node's port 7681
pub fn node_shell_daemon_set(image: &str) -> DaemonSet {
    DaemonSet {
        metadata: namespaced_meta(
            names::NODE_SHELL_DAEMONSET,
            Some(app_labels(labels::NODE_SHELL)),
        ),
        spec: Some(DaemonSetSpec {
            selector: LabelSelector {
                match_labels: Some(app_labels(labels::NODE_SHELL)),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(app_labels(labels::NODE_SHELL)),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    service_account_name: Some(names::SERVICE_ACCOUNT.to_string()),
                    tolerations: Some(vec![Toleration {
                        operator: Some("Exists".to_string()),
                        ..Default::default()
                    }]),
                    host_network: Some(true),
                    host_pid: Some(true),
                    volumes: Some(vec![Volume {
                        name: HOST_ROOT_VOLUME.to_string(),
                        host_path: Some(HostPathVolumeSource {
                            path: "/".to_string(),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }]),
                    containers: vec![Container {
                        name: names::NODE_SHELL_CONTAINER.to_string(),
                        image: Some(image.to_string()),
                        command: Some(strings(&["/bin/sh", "-c"])),
                        args: Some(vec![NODE_SHELL_SCRIPT.to_string()]),
                        ports: Some(vec![ContainerPort {
                            name: Some(labels::NODE_SHELL.to_string()),
                            container_port: ports::NODE_SHELL,
                            host_port: Some(ports::NODE_SHELL),
                            ..Default::default()
                        }]),
                        volume_mounts: Some(vec![VolumeMount {
                            name: HOST_ROOT_VOLUME.to_string(),
                            mount_path: "/host".to_string(),
                            ..Default::default()
                        }]),
                        security_context: Some(SecurityContext {
                            privileged: Some(true),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn no_schedule_toleration(key: &str) -> Toleration {
    Toleration {
        key: Some(key.to_string()),
        effect: Some("NoSchedule".to_string()),
        ..Default::default()
    }
}

/// Single kubectl-capable shell, may land on control plane nodes
pub fn kubectl_shell_deployment(image: &str) -> Deployment {
    Deployment {
        metadata: namespaced_meta(
            names::KUBECTL_SHELL_DEPLOYMENT,
            Some(app_labels(labels::KUBECTL_SHELL)),
        ),
        spec: Some(DeploymentSpec {
            replicas: Some(1),
            selector: LabelSelector {
                match_labels: Some(app_labels(labels::KUBECTL_SHELL)),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(app_labels(labels::KUBECTL_SHELL)),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    service_account_name: Some(names::SERVICE_ACCOUNT.to_string()),
                    hostname: Some(labels::KUBECTL_SHELL.to_string()),
                    tolerations: Some(vec![
                        no_schedule_toleration("node-role.kubernetes.io/master"),
                        no_schedule_toleration("node-role.kubernetes.io/control-plane"),
                    ]),
                    containers: vec![Container {
                        name: names::KUBECTL_SHELL_CONTAINER.to_string(),
                        image: Some(image.to_string()),
                        command: Some(strings(&["/usr/bin/ttyd"])),
                        args: Some(strings(&["--writable", "-p", "7682", "/bin/bash"])),
                        ports: Some(vec![ContainerPort {
                            name: Some(labels::KUBECTL_SHELL.to_string()),
                            container_port: ports::KUBECTL_SHELL,
                            ..Default::default()
                        }]),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn kubectl_shell_service() -> Service {
    Service {
        metadata: namespaced_meta(names::KUBECTL_SHELL_SERVICE, None),
        spec: Some(ServiceSpec {
            type_: Some("NodePort".to_string()),
            selector: Some(app_labels(labels::KUBECTL_SHELL)),
            ports: Some(vec![ServicePort {
                protocol: Some("TCP".to_string()),
                port: ports::KUBECTL_SHELL_SERVICE,
                target_port: Some(IntOrString::Int(ports::KUBECTL_SHELL)),
                node_port: Some(ports::KUBECTL_SHELL_NODE_PORT),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// All manifests in provisioning order, as JSON documents
pub fn all(image: &str) -> serde_json::Result<Vec<serde_json::Value>> {
    Ok(vec![
        serde_json::to_value(namespace())?,
        serde_json::to_value(service_account())?,
        serde_json::to_value(cluster_role_binding())?,
        serde_json::to_value(node_shell_daemon_set(image))?,
        serde_json::to_value(kubectl_shell_deployment(image))?,
        serde_json::to_value(kubectl_shell_service())?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const IMAGE_A: &str = "repo/image:tag";
    const IMAGE_B: &str = "registry.local:5000/tools/shell:2.1";

    fn container_image(manifest: &Value) -> &Value {
        &manifest["spec"]["template"]["spec"]["containers"][0]["image"]
    }

    fn assert_only_image_differs(a: Value, mut b: Value) {
        assert_eq!(container_image(&a), &json!(IMAGE_A));
        assert_eq!(container_image(&b), &json!(IMAGE_B));
        b["spec"]["template"]["spec"]["containers"][0]["image"] = json!(IMAGE_A);
        assert_eq!(a, b);
    }

    #[test]
    fn test_daemon_set_substitutes_image_only() {
        let a = serde_json::to_value(node_shell_daemon_set(IMAGE_A)).unwrap();
        let b = serde_json::to_value(node_shell_daemon_set(IMAGE_B)).unwrap();
        assert_only_image_differs(a, b);
        let text = serde_json::to_string(&node_shell_daemon_set(IMAGE_B)).unwrap();
        assert_eq!(text.matches(IMAGE_B).count(), 1);
    }

    #[test]
    fn test_deployment_substitutes_image_only() {
        let a = serde_json::to_value(kubectl_shell_deployment(IMAGE_A)).unwrap();
        let b = serde_json::to_value(kubectl_shell_deployment(IMAGE_B)).unwrap();
        assert_only_image_differs(a, b);
        let text = serde_json::to_string(&kubectl_shell_deployment(IMAGE_B)).unwrap();
        assert_eq!(text.matches(IMAGE_B).count(), 1);
    }

    #[test]
    fn test_daemon_set_matches_template() {
        let expected = json!({
            "apiVersion": "apps/v1",
            "kind": "DaemonSet",
            "metadata": {
                "name": "node-shell-ds",
                "namespace": "kubexm-terminals",
                "labels": { "app": "node-shell" }
            },
            "spec": {
                "selector": { "matchLabels": { "app": "node-shell" } },
                "template": {
                    "metadata": { "labels": { "app": "node-shell" } },
                    "spec": {
                        "serviceAccountName": "ops-ui-admin-sa",
                        "tolerations": [{ "operator": "Exists" }],
                        "hostNetwork": true,
                        "hostPID": true,
                        "volumes": [{ "name": "host-root", "hostPath": { "path": "/" } }],
                        "containers": [{
                            "name": "node-shell-container",
                            "image": IMAGE_A,
                            "command": ["/bin/sh", "-c"],
                            "args": [NODE_SHELL_SCRIPT],
                            "ports": [{ "name": "node-shell", "containerPort": 7681, "hostPort": 7681 }],
                            "volumeMounts": [{ "name": "host-root", "mountPath": "/host" }],
                            "securityContext": { "privileged": true }
                        }]
                    }
                }
            }
        });

        assert_eq!(
            serde_json::to_value(node_shell_daemon_set(IMAGE_A)).unwrap(),
            expected
        );
    }

    #[test]
    fn test_deployment_matches_template() {
        let expected = json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {
                "name": "kubectl-shell-deployment",
                "namespace": "kubexm-terminals",
                "labels": { "app": "kubectl-shell" }
            },
            "spec": {
                "replicas": 1,
                "selector": { "matchLabels": { "app": "kubectl-shell" } },
                "template": {
                    "metadata": { "labels": { "app": "kubectl-shell" } },
                    "spec": {
                        "serviceAccountName": "ops-ui-admin-sa",
                        "hostname": "kubectl-shell",
                        "tolerations": [
                            { "key": "node-role.kubernetes.io/master", "effect": "NoSchedule" },
                            { "key": "node-role.kubernetes.io/control-plane", "effect": "NoSchedule" }
                        ],
                        "containers": [{
                            "name": "kubectl-shell-container",
                            "image": IMAGE_A,
                            "command": ["/usr/bin/ttyd"],
                            "args": ["--writable", "-p", "7682", "/bin/bash"],
                            "ports": [{ "name": "kubectl-shell", "containerPort": 7682 }]
                        }]
                    }
                }
            }
        });

        assert_eq!(
            serde_json::to_value(kubectl_shell_deployment(IMAGE_A)).unwrap(),
            expected
        );
    }

    #[test]
    fn test_cluster_role_binding_grants_cluster_admin_to_service_account() {
        let binding = serde_json::to_value(cluster_role_binding()).unwrap();
        assert_eq!(
            binding,
            json!({
                "apiVersion": "rbac.authorization.k8s.io/v1",
                "kind": "ClusterRoleBinding",
                "metadata": { "name": "ops-ui-admin-binding" },
                "subjects": [{
                    "kind": "ServiceAccount",
                    "name": "ops-ui-admin-sa",
                    "namespace": "kubexm-terminals"
                }],
                "roleRef": {
                    "kind": "ClusterRole",
                    "name": "cluster-admin",
                    "apiGroup": "rbac.authorization.k8s.io"
                }
            })
        );
    }

    #[test]
    fn test_service_exposes_fixed_node_port() {
        let service = serde_json::to_value(kubectl_shell_service()).unwrap();
        assert_eq!(service["spec"]["type"], json!("NodePort"));
        assert_eq!(service["spec"]["selector"], json!({ "app": "kubectl-shell" }));
        assert_eq!(
            service["spec"]["ports"],
            json!([{ "protocol": "TCP", "port": 80, "targetPort": 7682, "nodePort": 30082 }])
        );
    }

    #[test]
    fn test_all_is_in_provisioning_order() {
        let kinds: Vec<String> = all(IMAGE_A)
            .unwrap()
            .iter()
            .map(|m| m["kind"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "Namespace",
                "ServiceAccount",
                "ClusterRoleBinding",
                "DaemonSet",
                "Deployment",
                "Service"
            ]
        );
    }
}
