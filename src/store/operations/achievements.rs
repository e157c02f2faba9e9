use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// An unlocked catalog entry. Append-only: an id, once earned, is never
/// re-evaluated or revoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarnedAchievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub threshold: i64,
    pub earned_at: DateTime<Utc>,
}

impl Store {
    /// Insert if absent; an already-earned id is left untouched so the
    /// original `earned_at` survives replays.
    pub fn append_achievement(&self, earned: &EarnedAchievement) -> Result<bool, StoreError> {
        let key = keys::achievement_key(&earned.id);
        if self.achievements.get(key.as_bytes())?.is_some() {
            return Ok(false);
        }
        self.achievements
            .insert(key.as_bytes(), Self::serialize(earned)?)?;
        Ok(true)
    }

    pub fn list_achievements(&self) -> Result<Vec<EarnedAchievement>, StoreError> {
        let mut earned = Vec::new();
        for item in self.achievements.iter() {
            let (_, value) = item?;
            earned.push(Self::deserialize(&value)?);
        }
        Ok(earned)
    }

    pub fn earned_achievement_ids(&self) -> Result<BTreeSet<String>, StoreError> {
        let mut ids = BTreeSet::new();
        for item in self.achievements.iter() {
            let (key, _) = item?;
            ids.insert(String::from_utf8_lossy(&key).to_string());
        }
        Ok(ids)
    }
}
