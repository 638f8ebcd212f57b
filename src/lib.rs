// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod manifests;
pub mod nodes;
pub mod pagination;
pub mod terminals;

#[cfg(test)]
mod test_utils;
