pub mod keys;
pub mod operations;
pub mod trees;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::Db;
use thiserror::Error;

/// All persistent state lives here, one named tree per collection.
///
/// Two tree groups mirror the storage partitions the extension model needs:
/// a small "synced" group (`user_config`, `goals`) and a bulkier local group
/// (stats, histories, derived snapshots, achievements). sled gives both the
/// same `get`/`insert` capability set; the split is a durability contract,
/// not a mechanism.
#[derive(Debug)]
pub struct Store {
    db: Db,
    pub platform_stats: sled::Tree,
    pub daily_logs: sled::Tree,
    pub rating_history: sled::Tree,
    pub combined_ratings: sled::Tree,
    pub derived: sled::Tree,
    pub achievements: sled::Tree,
    pub goals: sled::Tree,
    pub user_config: sled::Tree,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("not found: entity={entity}, key={key}")]
    NotFound { entity: String, key: String },
    #[error("validation error: {0}")]
    Validation(String),
}

impl Store {
    pub fn open(sled_path: &str) -> Result<Self, StoreError> {
        let db = sled::open(sled_path)?;
        let platform_stats = db.open_tree(trees::PLATFORM_STATS)?;
        let daily_logs = db.open_tree(trees::DAILY_LOGS)?;
        let rating_history = db.open_tree(trees::RATING_HISTORY)?;
        let combined_ratings = db.open_tree(trees::COMBINED_RATINGS)?;
        let derived = db.open_tree(trees::DERIVED)?;
        let achievements = db.open_tree(trees::ACHIEVEMENTS)?;
        let goals = db.open_tree(trees::GOALS)?;
        let user_config = db.open_tree(trees::USER_CONFIG)?;

        Ok(Self {
            db,
            platform_stats,
            daily_logs,
            rating_history,
            combined_ratings,
            derived,
            achievements,
            goals,
            user_config,
        })
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    pub(crate) fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec(value)?)
    }

    pub(crate) fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
