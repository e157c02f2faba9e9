//! Hourly tick that runs a sync pass once the configured period has elapsed.

use chrono::Utc;

use crate::store::Store;
use crate::sync::{SyncEngine, SyncError};

pub async fn run(store: &Store, sync_engine: &SyncEngine) {
    let period_hours = match store.get_user_config() {
        Ok(cfg) => cfg.sync_period_hours,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to read user config, skipping sync tick");
            return;
        }
    };

    let due = match store.get_last_sync() {
        Ok(Some(last)) => {
            let elapsed = Utc::now().signed_duration_since(last);
            elapsed.num_hours() >= period_hours as i64
        }
        Ok(None) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to read last sync time, skipping sync tick");
            return;
        }
    };
    if !due {
        tracing::debug!(period_hours, "Sync period not elapsed yet");
        return;
    }

    match sync_engine.run().await {
        Ok(report) => tracing::info!(
            sync_id = %report.sync_id,
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "Periodic sync complete"
        ),
        Err(SyncError::NoUsernames) => {
            tracing::info!("No platform usernames configured, skipping periodic sync");
        }
        Err(err) => tracing::error!(error = %err, "Periodic sync failed"),
    }
}
