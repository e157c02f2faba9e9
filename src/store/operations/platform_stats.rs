use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::connectors::Platform;
use crate::store::keys;
use crate::store::operations::rating_history::RatingHistoryEntry;
use crate::store::{Store, StoreError};

/// Per-platform statistics snapshot. Replaced whole on every successful
/// sync; never merged field by field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub platform: Platform,
    pub problems_solved: u64,
    pub rating: Option<i64>,
    pub max_rating: Option<i64>,
    pub rank: Option<String>,
    pub contests_participated: u64,
    #[serde(default)]
    pub tag_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub solved_problems: Vec<SolvedProblem>,
    #[serde(default)]
    pub rating_history: Vec<RatingHistoryEntry>,
    pub last_updated: DateTime<Utc>,
    /// Set when the last fetch failed and no richer data was available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvedProblem {
    pub name: String,
    pub rating: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Epoch seconds; absent on platforms without chronological data.
    pub solved_at: Option<i64>,
}

impl PlatformStats {
    /// Minimal record standing in for a failed fetch, so one platform's
    /// outage never aborts a sync batch.
    pub fn from_error(platform: Platform, error: &str, now: DateTime<Utc>) -> Self {
        Self {
            platform,
            problems_solved: 0,
            rating: None,
            max_rating: None,
            rank: None,
            contests_participated: 0,
            tag_distribution: BTreeMap::new(),
            solved_problems: Vec::new(),
            rating_history: Vec::new(),
            last_updated: now,
            error: Some(error.to_string()),
        }
    }
}

impl Store {
    pub fn put_platform_stats(&self, stats: &PlatformStats) -> Result<(), StoreError> {
        self.platform_stats.insert(
            keys::platform_key(stats.platform).as_bytes(),
            Self::serialize(stats)?,
        )?;
        Ok(())
    }

    pub fn get_platform_stats(
        &self,
        platform: Platform,
    ) -> Result<Option<PlatformStats>, StoreError> {
        match self
            .platform_stats
            .get(keys::platform_key(platform).as_bytes())?
        {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn list_platform_stats(&self) -> Result<BTreeMap<Platform, PlatformStats>, StoreError> {
        let mut all = BTreeMap::new();
        for item in self.platform_stats.iter() {
            let (_, value) = item?;
            let stats: PlatformStats = Self::deserialize(&value)?;
            all.insert(stats.platform, stats);
        }
        Ok(all)
    }
}
