// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! Console state and its allowed transitions.
//!
//! ```text
//! Unknown ──probed──▶ Ready | NotReady
//! NotReady | Failed ──begin_install──▶ Installing
//! Installing ──finish_install──▶ Ready | NotReady | Failed
//! ```
//!
//! Any settled state may be probed again.

use crate::error::{Result, TerminalsError};
use crate::terminals::Readiness;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConsoleState {
    #[default]
    Unknown,
    NotReady {
        /// Set when the readiness check itself failed
        error: Option<String>,
    },
    Installing,
    Ready,
    Failed {
        error: String,
    },
}

impl ConsoleState {
    fn name(&self) -> &'static str {
        match self {
            ConsoleState::Unknown => "unknown",
            ConsoleState::NotReady { .. } => "not ready",
            ConsoleState::Installing => "installing",
            ConsoleState::Ready => "ready",
            ConsoleState::Failed { .. } => "failed",
        }
    }

    fn invalid(&self, event: &'static str) -> TerminalsError {
        TerminalsError::InvalidTransition {
            state: self.name(),
            event,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ConsoleState::Ready)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ConsoleState::NotReady { error } => error.as_deref(),
            ConsoleState::Failed { error } => Some(error.as_str()),
            _ => None,
        }
    }

    /// Apply the result of a readiness check
    pub fn probed(&self, readiness: Readiness) -> Result<ConsoleState> {
        if *self == ConsoleState::Installing {
            return Err(self.invalid("apply a readiness check"));
        }
        Ok(Self::from_readiness(readiness))
    }

    pub fn begin_install(&self) -> Result<ConsoleState> {
        match self {
            ConsoleState::NotReady { .. } | ConsoleState::Failed { .. } => {
                Ok(ConsoleState::Installing)
            }
            _ => Err(self.invalid("start an install")),
        }
    }

    /// `outcome` is the re-probe after a completed install, or the install error
    pub fn finish_install(
        &self,
        outcome: std::result::Result<Readiness, String>,
    ) -> Result<ConsoleState> {
        if *self != ConsoleState::Installing {
            return Err(self.invalid("finish an install"));
        }
        Ok(match outcome {
            Ok(readiness) => Self::from_readiness(readiness),
            Err(error) => ConsoleState::Failed { error },
        })
    }

    fn from_readiness(readiness: Readiness) -> ConsoleState {
        match readiness {
            Readiness::Ready => ConsoleState::Ready,
            Readiness::NotInstalled => ConsoleState::NotReady { error: None },
            Readiness::CheckFailed(message) => ConsoleState::NotReady {
                error: Some(message),
            },
        }
    }
}

impl fmt::Display for ConsoleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
