// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0
use crate::terminals::Step;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerminalsError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Install failed while creating {step}: {source}")]
    ProvisionError {
        step: Step,
        #[source]
        source: kube::Error,
    },

    #[error("Cannot {event} while the console is {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },

    #[error("Invalid terminal address: {0}")]
    InvalidAddress(String),

    #[error("Invalid rows per page '{0}', expected a positive number or 'all'")]
    InvalidPageSize(String),

    #[error("Terminal backend is not installed, run `kubexm-terminals install` first")]
    NotInstalled,

    #[error("Terminal backend is not ready: {0}")]
    NotReady(String),

    #[error("Terminal image must not be empty")]
    EmptyImage,

    #[error("Failed to watch {0}")]
    WatchError(String),

    #[error("kubectl shell did not become available within {0:?}")]
    RolloutTimeout(Duration),
}

pub type Result<T> = std::result::Result<T, TerminalsError>;

/// How an API failure is interpreted by the prober and the provisioner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 404, the object does not exist
    NotFound,
    /// 409, the object already exists
    Conflict,
    Other,
}

impl ApiErrorKind {
    pub fn classify(error: &kube::Error) -> Self {
        match error {
            kube::Error::Api(response) if response.code == 404 => ApiErrorKind::NotFound,
            kube::Error::Api(response) if response.code == 409 => ApiErrorKind::Conflict,
            _ => ApiErrorKind::Other,
        }
    }
}
