// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! Readiness checking and installation of the terminal backend.

pub mod probe;
pub mod provisioner;

pub use probe::{probe_readiness, Readiness};
pub use provisioner::{ProvisionReport, Provisioner, Step};
