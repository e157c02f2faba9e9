use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::connectors::Platform;
use crate::store::keys;
use crate::store::{Store, StoreError};

/// One contest event. Keyed by `date` within a platform: a reissued rating
/// event for the same date replaces the stored one instead of duplicating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingHistoryEntry {
    pub date: String,
    pub contest_name: String,
    pub old_rating: i64,
    pub new_rating: i64,
    pub rating_change: i64,
    pub platform: Platform,
    /// Epoch seconds; the sort key for the stored sequence.
    pub timestamp: i64,
}

/// One calendar date's rating snapshot across all platforms active that day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedRatingEntry {
    pub date: String,
    pub ratings: BTreeMap<Platform, i64>,
}

/// Keyed upsert over a stored sequence: existing entries first, incoming
/// entries overwrite on key collision. The uniform merge primitive behind
/// both rating-history collections; running it twice with the same incoming
/// batch is a no-op.
pub fn merge_by_key<T, K, F>(existing: Vec<T>, incoming: Vec<T>, key_of: F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut merged: BTreeMap<K, T> = BTreeMap::new();
    for entry in existing.into_iter().chain(incoming) {
        merged.insert(key_of(&entry), entry);
    }
    merged.into_values().collect()
}

impl Store {
    /// Merge freshly fetched contest events into the platform's stored
    /// history: upsert by date, re-sort ascending by timestamp, persist whole.
    pub fn merge_rating_history(
        &self,
        platform: Platform,
        incoming: &[RatingHistoryEntry],
    ) -> Result<(), StoreError> {
        if incoming.is_empty() {
            return Ok(());
        }

        let existing = self.get_rating_history(platform)?;
        let mut merged = merge_by_key(existing, incoming.to_vec(), |e| e.date.clone());
        merged.sort_by_key(|e| e.timestamp);

        self.rating_history.insert(
            keys::platform_key(platform).as_bytes(),
            Self::serialize(&merged)?,
        )?;
        Ok(())
    }

    pub fn get_rating_history(
        &self,
        platform: Platform,
    ) -> Result<Vec<RatingHistoryEntry>, StoreError> {
        match self
            .rating_history
            .get(keys::platform_key(platform).as_bytes())?
        {
            Some(raw) => Ok(Self::deserialize(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Upsert today's rating for one platform into the combined history.
    /// New ratings for an existing date replace that date's record.
    pub fn upsert_combined_rating(
        &self,
        date: &str,
        platform: Platform,
        rating: i64,
    ) -> Result<(), StoreError> {
        let key = keys::combined_rating_key(date);
        let mut entry = match self.combined_ratings.get(key.as_bytes())? {
            Some(raw) => Self::deserialize::<CombinedRatingEntry>(&raw)?,
            None => CombinedRatingEntry {
                date: date.to_string(),
                ratings: BTreeMap::new(),
            },
        };
        entry.ratings.insert(platform, rating);
        self.combined_ratings
            .insert(key.as_bytes(), Self::serialize(&entry)?)?;
        Ok(())
    }

    /// All combined entries, ascending by date.
    pub fn list_combined_ratings(&self) -> Result<Vec<CombinedRatingEntry>, StoreError> {
        let mut entries = Vec::new();
        for item in self.combined_ratings.iter() {
            let (_, value) = item?;
            entries.push(Self::deserialize(&value)?);
        }
        Ok(entries)
    }
}

/// Convenience used by the sync pass and by goal progress: contest count in
/// the given month ("YYYY-MM" prefix match on entry dates).
pub fn contests_in_month(history: &[RatingHistoryEntry], month_prefix: &str) -> u64 {
    history
        .iter()
        .filter(|e| e.date.starts_with(month_prefix))
        .count() as u64
}
