use chrono::{DateTime, Utc};

use crate::analytics::aggregate::AggregatedStats;
use crate::store::keys;
use crate::store::{Store, StoreError};
use crate::sync::SyncReport;

impl Store {
    /// The aggregate snapshot is always replaced, never merged.
    pub fn put_aggregated_stats(&self, stats: &AggregatedStats) -> Result<(), StoreError> {
        self.derived
            .insert(keys::AGGREGATED_KEY.as_bytes(), Self::serialize(stats)?)?;
        Ok(())
    }

    pub fn get_aggregated_stats(&self) -> Result<Option<AggregatedStats>, StoreError> {
        match self.derived.get(keys::AGGREGATED_KEY.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_last_sync(&self, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.derived
            .insert(keys::LAST_SYNC_KEY.as_bytes(), Self::serialize(&at)?)?;
        Ok(())
    }

    pub fn get_last_sync(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        match self.derived.get(keys::LAST_SYNC_KEY.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn put_sync_report(&self, report: &SyncReport) -> Result<(), StoreError> {
        self.derived
            .insert(keys::LAST_REPORT_KEY.as_bytes(), Self::serialize(report)?)?;
        Ok(())
    }

    pub fn get_sync_report(&self) -> Result<Option<SyncReport>, StoreError> {
        match self.derived.get(keys::LAST_REPORT_KEY.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }
}
