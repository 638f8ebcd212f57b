// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! The terminals console: its state, the page driving it, and terminal links.

pub mod page;
pub mod state;

pub use page::ConsolePage;
pub use state::ConsoleState;

use crate::error::{Result, TerminalsError};
use url::Url;

/// Build the http link of a ttyd terminal on `host`
pub fn terminal_url(host: &str, port: i32) -> Result<Url> {
    let host = host.trim();
    if host.is_empty() {
        return Err(TerminalsError::InvalidAddress("empty host".to_string()));
    }

    // Bare IPv6 literals need brackets in a URL
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    };

    Url::parse(&format!("http://{}:{}/", host, port))
        .map_err(|e| TerminalsError::InvalidAddress(format!("{}: {}", host, e)))
}
