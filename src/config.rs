// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, DEFAULT_TERMINAL_IMAGE};
use crate::pagination::RowsPerPage;
use anyhow::{bail, Context, Result};
use std::env;

/// Settings loaded from environment variables, overridable from the command line
#[derive(Debug, Clone)]
pub struct Config {
    /// Image run by both terminal workloads
    pub terminal_image: String,
    /// Host used for the kubectl console link, the API server host when unset
    pub console_host: Option<String>,
    /// Raw page size, parsed only by the commands that page
    rows_per_page: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let terminal_image = lookup(vars::TERMINAL_IMAGE)
            .unwrap_or_else(|| DEFAULT_TERMINAL_IMAGE.to_string());
        if terminal_image.trim().is_empty() {
            bail!("{} must not be empty", vars::TERMINAL_IMAGE);
        }

        let console_host = lookup(vars::CONSOLE_HOST).filter(|h| !h.trim().is_empty());

        Ok(Config {
            terminal_image,
            console_host,
            rows_per_page: lookup(vars::ROWS_PER_PAGE),
        })
    }

    pub fn rows_per_page(&self) -> Result<RowsPerPage> {
        match &self.rows_per_page {
            Some(raw) => raw
                .parse::<RowsPerPage>()
                .with_context(|| format!("{} has an invalid value", vars::ROWS_PER_PAGE)),
            None => Ok(RowsPerPage::default()),
        }
    }
}
