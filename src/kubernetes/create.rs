// Copyright 2026, The kubexm-terminals Authors
// SPDX-License-Identifier: Apache-2.0

//! Create-only object management that tolerates objects which already exist

use crate::constants::FIELD_MANAGER;
use crate::error::ApiErrorKind;
use kube::{api::PostParams, Api, Resource, ResourceExt};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::{self, Debug};
use tracing::{info, instrument, warn};

/// Successful result of [`create_if_absent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// The API server answered 409, the object was left untouched
    AlreadyPresent,
}

impl fmt::Display for CreateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateOutcome::Created => write!(f, "created"),
            CreateOutcome::AlreadyPresent => write!(f, "already present"),
        }
    }
}

/// POST the object, treating an "already exists" conflict as success.
///
/// Existing objects are never updated, so a changed manifest does not reach
/// objects created by an earlier run.
#[instrument(skip(api, object), fields(kind = %K::kind(&()), name = %object.name_any()))]
pub async fn create_if_absent<K>(api: &Api<K>, object: &K) -> Result<CreateOutcome, kube::Error>
where
    K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Serialize + Debug,
{
    let params = PostParams {
        field_manager: Some(FIELD_MANAGER.to_string()),
        ..Default::default()
    };

    match api.create(&params, object).await {
        Ok(_) => {
            info!("Created {} {}", K::kind(&()), object.name_any());
            Ok(CreateOutcome::Created)
        }
        Err(e) if ApiErrorKind::classify(&e) == ApiErrorKind::Conflict => {
            warn!("{} {} already exists, leaving it as is", K::kind(&()), object.name_any());
            Ok(CreateOutcome::AlreadyPresent)
        }
        Err(e) => Err(e),
    }
}
