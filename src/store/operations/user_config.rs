use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::connectors::Platform;
use crate::constants::SYNC_PERIODS_HOURS;
use crate::store::keys;
use crate::store::{Store, StoreError};

/// User configuration: which usernames to sync and how often. Lives in the
/// synced partition alongside goals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    #[serde(default)]
    pub usernames: BTreeMap<Platform, String>,
    pub sync_period_hours: u64,
    #[serde(default)]
    pub notifications_enabled: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            usernames: BTreeMap::new(),
            sync_period_hours: 6,
            notifications_enabled: true,
        }
    }
}

impl UserConfig {
    /// Platforms with a non-empty username, in registry order.
    pub fn configured_platforms(&self) -> Vec<(Platform, String)> {
        self.usernames
            .iter()
            .filter(|(_, name)| !name.trim().is_empty())
            .map(|(p, name)| (*p, name.trim().to_string()))
            .collect()
    }
}

impl Store {
    pub fn get_user_config(&self) -> Result<UserConfig, StoreError> {
        match self.user_config.get(keys::USER_CONFIG_KEY.as_bytes())? {
            Some(raw) => Ok(Self::deserialize(&raw)?),
            None => Ok(UserConfig::default()),
        }
    }

    pub fn set_user_config(&self, config: &UserConfig) -> Result<(), StoreError> {
        if !SYNC_PERIODS_HOURS.contains(&config.sync_period_hours) {
            return Err(StoreError::Validation(format!(
                "unsupported sync period: {}h",
                config.sync_period_hours
            )));
        }
        self.user_config
            .insert(keys::USER_CONFIG_KEY.as_bytes(), Self::serialize(config)?)?;
        Ok(())
    }
}
