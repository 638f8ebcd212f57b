// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use kubexm_terminals::config::Config;
use kubexm_terminals::console::ConsolePage;
use kubexm_terminals::constants::rollout::DEFAULT_TIMEOUT_SECS;
use kubexm_terminals::error::TerminalsError;
use kubexm_terminals::kubernetes::{connect, wait_for_kubectl_shell};
use kubexm_terminals::manifests;
use kubexm_terminals::pagination::{paginate, RowsPerPage};
use output::{ManifestFormat, OutputFormat};

/// Web terminals for Kubernetes nodes and kubectl
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Kubeconfig context to use instead of the current one
    #[arg(long, global = true)]
    context: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the terminal backend is installed
    Status,
    /// Install or repair the terminal backend
    Install {
        /// Terminal image, overrides KUBEXM_TERMINAL_IMAGE
        #[arg(short, long)]
        image: Option<String>,
        /// Wait for the kubectl shell to become available
        #[arg(long)]
        wait: bool,
        /// Seconds to wait with --wait
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
    },
    /// List nodes with their console links
    Nodes {
        /// Page to show, starting at 1
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        page: u64,
        /// Rows per page, a number or "all"; overrides KUBEXM_ROWS_PER_PAGE
        #[arg(long)]
        per_page: Option<RowsPerPage>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Print the backend manifests without touching the cluster
    Manifests {
        /// Terminal image, overrides KUBEXM_TERMINAL_IMAGE
        #[arg(short, long)]
        image: Option<String>,
        #[arg(short, long, value_enum, default_value_t = ManifestFormat::Yaml)]
        output: ManifestFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, command output to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let context = cli.context.as_deref();

    match cli.command {
        Commands::Status => status(open_page(context, &config).await?),
        Commands::Install {
            image,
            wait,
            timeout,
        } => {
            let image = image.unwrap_or_else(|| config.terminal_image.clone());
            let page = open_page(context, &config).await?;
            install(page, &image, wait.then(|| Duration::from_secs(timeout))).await
        }
        Commands::Nodes {
            page: page_number,
            per_page,
            output: format,
        } => {
            let rows = match per_page {
                Some(rows) => rows,
                None => config.rows_per_page()?,
            };
            let page = open_page(context, &config).await?;
            nodes(page, page_number, rows, format).await
        }
        Commands::Manifests {
            image,
            output: format,
        } => {
            let image = image.unwrap_or(config.terminal_image);
            output::print_manifests(&manifests::all(&image)?, format)
        }
    }
}

/// Connect and check the backend, the way every page load starts
async fn open_page(context: Option<&str>, config: &Config) -> Result<ConsolePage> {
    let connection = connect(context).await?;
    let mut page = ConsolePage::new(connection, config.console_host.clone());
    page.refresh().await?;
    Ok(page)
}

fn print_kubectl_console(page: &ConsolePage) -> Result<()> {
    output::print_info(&format!(
        "Cluster console (kubectl): {}",
        page.kubectl_console_url()?
    ));
    Ok(())
}

fn status(page: ConsolePage) -> Result<()> {
    match page.ensure_ready() {
        Ok(()) => {
            output::print_success("Terminal backend is installed");
            print_kubectl_console(&page)
        }
        Err(TerminalsError::NotInstalled) => {
            output::print_warning("Terminal backend is not installed, run `kubexm-terminals install`");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn install(mut page: ConsolePage, image: &str, wait: Option<Duration>) -> Result<()> {
    if let Some(error) = page.state().error() {
        output::print_warning(error);
    }

    match page.install_if_missing(image).await? {
        Some(report) => output::print_report(&report),
        None => {
            output::print_success("Terminal backend is already installed");
            return Ok(());
        }
    }

    if let Some(limit) = wait {
        wait_for_kubectl_shell(page.client(), limit).await?;
    }

    page.ensure_ready()
        .context("Install finished but the terminal backend is not ready")?;
    output::print_success("Terminal backend installed");
    print_kubectl_console(&page)
}

async fn nodes(
    page: ConsolePage,
    page_number: u64,
    rows: RowsPerPage,
    format: OutputFormat,
) -> Result<()> {
    let nodes = page.nodes().await?;
    let page_index = usize::try_from(page_number - 1).context("Page number is too large")?;
    let (visible, window) = paginate(&nodes, page_index, rows);

    if format == OutputFormat::Table {
        print_kubectl_console(&page)?;
    }
    output::print_nodes(visible, window, format)
}
