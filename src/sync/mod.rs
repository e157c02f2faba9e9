pub mod engine;
pub mod normalizer;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::connectors::Platform;
use crate::store::StoreError;

pub use engine::SyncEngine;

/// Outcome of one sync pass. The most recent report is persisted and served
/// from the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub sync_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub succeeded: Vec<Platform>,
    pub failed: Vec<SyncFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncFailure {
    pub platform: Platform,
    pub error: String,
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("no platform usernames configured")]
    NoUsernames,
    #[error(transparent)]
    Store(#[from] StoreError),
}
