// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, idempotent creates, and rollout waiting.

pub mod client;
pub mod create;
pub mod wait;

pub use client::{connect, ClusterConnection};
pub use create::{create_if_absent, CreateOutcome};
pub use wait::wait_for_kubectl_shell;
