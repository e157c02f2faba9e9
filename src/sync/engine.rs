//! The sync orchestrator: fetch all configured platforms concurrently, merge
//! results sequentially, then refresh every derived view.

use std::sync::Arc;

use chrono::{Local, Utc};
use futures::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::aggregate::compute_aggregates;
use crate::connectors::{ConnectorError, ConnectorRegistry, Platform};
use crate::goals::{evaluate_achievements, recompute_goals};
use crate::store::operations::platform_stats::PlatformStats;
use crate::store::{Store, StoreError};
use crate::sync::normalizer::normalize;
use crate::sync::{SyncError, SyncFailure, SyncReport};

pub struct SyncEngine {
    store: Arc<Store>,
    registry: ConnectorRegistry,
}

impl SyncEngine {
    pub fn new(store: Arc<Store>, registry: ConnectorRegistry) -> Self {
        Self { store, registry }
    }

    /// Run one full sync pass.
    ///
    /// Per-platform failure is tolerated: a failed fetch lands in the
    /// report's `failed` list and the rest of the pass continues. The pass
    /// itself errors only when nothing is configured or the store breaks.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let started_at = Utc::now();
        let sync_id = Uuid::new_v4().to_string();

        let user_config = self.store.get_user_config()?;
        let targets = user_config.configured_platforms();
        if targets.is_empty() {
            return Err(SyncError::NoUsernames);
        }

        info!(sync_id = %sync_id, platforms = targets.len(), "Sync pass started");

        let fetches = targets.into_iter().map(|(platform, username)| {
            let registry = self.registry.clone();
            async move {
                let result = match registry.get(platform) {
                    Some(connector) => connector.fetch(&username).await,
                    None => Err(ConnectorError::Payload {
                        platform,
                        message: "no connector registered".to_string(),
                    }),
                };
                (platform, result)
            }
        });
        let results = join_all(fetches).await;

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();
        for (platform, result) in results {
            match result {
                Ok(raw) => {
                    let stats = normalize(platform, raw, Utc::now());
                    self.apply(&stats)?;
                    succeeded.push(platform);
                }
                Err(err) => {
                    warn!(%platform, error = %err, "Platform fetch failed");
                    self.record_failure(platform, &err.to_string())?;
                    failed.push(SyncFailure {
                        platform,
                        error: err.to_string(),
                    });
                }
            }
        }

        let now = Utc::now();
        let all_stats = self.store.list_platform_stats()?;
        self.store
            .put_aggregated_stats(&compute_aggregates(&all_stats, now))?;
        self.store.set_last_sync(now)?;

        evaluate_achievements(&self.store, now)?;
        recompute_goals(&self.store, Local::now().date_naive(), now)?;

        let report = SyncReport {
            sync_id,
            started_at,
            finished_at: Utc::now(),
            succeeded,
            failed,
        };
        self.store.put_sync_report(&report)?;
        info!(
            sync_id = %report.sync_id,
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "Sync pass finished"
        );
        Ok(report)
    }

    /// Persist one platform's fresh snapshot and fold it into the histories.
    fn apply(&self, stats: &PlatformStats) -> Result<(), StoreError> {
        self.store.put_platform_stats(stats)?;
        self.store.merge_daily_logs(stats)?;
        self.store
            .merge_rating_history(stats.platform, &stats.rating_history)?;

        if let Some(rating) = stats.rating.filter(|r| *r > 0) {
            let today = Local::now().format("%Y-%m-%d").to_string();
            self.store
                .upsert_combined_rating(&today, stats.platform, rating)?;
        }
        Ok(())
    }

    /// An error record is written only when no earlier snapshot exists, so a
    /// transient outage never wipes cached data out of the aggregates.
    fn record_failure(&self, platform: Platform, error: &str) -> Result<(), StoreError> {
        if self.store.get_platform_stats(platform)?.is_none() {
            self.store
                .put_platform_stats(&PlatformStats::from_error(platform, error, Utc::now()))?;
        }
        Ok(())
    }
}
