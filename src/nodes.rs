// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! Node listing and per-node terminal addresses

use crate::console::terminal_url;
use crate::constants::ports;
use crate::error::Result;
use k8s_openapi::api::core::v1::{Node, NodeAddress};
use kube::{api::ListParams, Api, Client, ResourceExt};
use serde::Serialize;
use tracing::{debug, instrument};

/// Pick the address a browser should use to reach the node.
///
/// An external IP wins over an internal one. When a type is listed more than
/// once the last entry is used.
pub fn resolve_node_address(addresses: &[NodeAddress]) -> Option<String> {
    let mut internal = None;
    let mut external = None;

    for address in addresses {
        match address.type_.as_str() {
            "ExternalIP" => external = Some(address.address.clone()),
            "InternalIP" => internal = Some(address.address.clone()),
            _ => {}
        }
    }

    external.or(internal)
}

/// What the node table shows for one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSummary {
    pub name: String,
    pub uid: Option<String>,
    pub address: Option<String>,
    pub os_image: Option<String>,
    pub kubelet_version: Option<String>,
    /// Node shell link, absent when the node has no usable address
    pub console_url: Option<String>,
}

impl NodeSummary {
    pub fn from_node(node: &Node) -> Self {
        let status = node.status.as_ref();
        let address = status
            .and_then(|s| s.addresses.as_deref())
            .and_then(resolve_node_address);
        let node_info = status.and_then(|s| s.node_info.as_ref());

        let console_url = address
            .as_deref()
            .and_then(|ip| match terminal_url(ip, ports::NODE_SHELL) {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    debug!("No console link for node {}: {}", node.name_any(), e);
                    None
                }
            });

        NodeSummary {
            name: node.name_any(),
            uid: node.uid(),
            address,
            os_image: node_info.map(|i| i.os_image.clone()),
            kubelet_version: node_info.map(|i| i.kubelet_version.clone()),
            console_url,
        }
    }
}

/// List all cluster nodes
#[instrument(skip(client))]
pub async fn list_nodes(client: &Client) -> Result<Vec<NodeSummary>> {
    let nodes: Api<Node> = Api::all(client.clone());
    let node_list = nodes.list(&ListParams::default()).await?;

    debug!("Found {} nodes", node_list.items.len());
    Ok(node_list.items.iter().map(NodeSummary::from_node).collect())
}
