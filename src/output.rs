// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! Output formatting for the command line

use clap::ValueEnum;
use colored::Colorize;
use kubexm_terminals::nodes::NodeSummary;
use kubexm_terminals::pagination::PageWindow;
use kubexm_terminals::terminals::ProvisionReport;
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "IP ADDRESS")]
    address: String,
    #[tabled(rename = "OS IMAGE")]
    os_image: String,
    #[tabled(rename = "KUBELET")]
    kubelet_version: String,
    #[tabled(rename = "CONSOLE")]
    console: String,
}

impl From<&NodeSummary> for NodeRow {
    fn from(node: &NodeSummary) -> Self {
        NodeRow {
            name: node.name.clone(),
            address: node.address.clone().unwrap_or_else(|| "Not Found".to_string()),
            os_image: node.os_image.clone().unwrap_or_default(),
            kubelet_version: node.kubelet_version.clone().unwrap_or_default(),
            console: node.console_url.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Print one page of the node table, or the page as JSON/YAML
pub fn print_nodes(
    nodes: &[NodeSummary],
    window: PageWindow,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            if nodes.is_empty() {
                println!("{}", "No nodes found".yellow());
            } else {
                let rows: Vec<NodeRow> = nodes.iter().map(NodeRow::from).collect();
                println!("{}", Table::new(rows));
            }
            println!("{}", window.to_string().dimmed());
        }
        OutputFormat::Json => print_json(&nodes)?,
        OutputFormat::Yaml => print_yaml(&nodes)?,
    }
    Ok(())
}

pub fn print_report(report: &ProvisionReport) {
    for (step, outcome) in &report.steps {
        println!("  {:<20} {}", step.to_string(), outcome);
    }
}

/// Print manifests as a multi-document YAML stream or a JSON array
pub fn print_manifests(manifests: &[serde_json::Value], format: ManifestFormat) -> anyhow::Result<()> {
    match format {
        ManifestFormat::Json => print_json(&manifests)?,
        ManifestFormat::Yaml => {
            for manifest in manifests {
                println!("---");
                print!("{}", serde_yaml::to_string(manifest)?);
            }
        }
    }
    Ok(())
}

/// Print data as pretty-printed JSON
pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}

/// Print data as YAML
pub fn print_yaml<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    print!("{}", yaml);
    Ok(())
}

/// Print a success message with green checkmark
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message.yellow());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
