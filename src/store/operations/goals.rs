use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::connectors::Platform;
use crate::store::keys;
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Weekly,
    Monthly,
    Streak,
    Rating,
    Contest,
}

/// User-defined target. `progress` is recomputed every sync cycle;
/// `completed` flips false -> true exactly once, stamping `completed_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Creation-timestamp millis, assigned at creation.
    pub id: String,
    pub goal_type: GoalType,
    pub target: i64,
    pub description: String,
    /// Required iff `goal_type` is `Rating`.
    pub platform: Option<Platform>,
    /// Rating baseline captured at creation for rating goals.
    pub initial_rating: Option<i64>,
    pub progress: i64,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(
        goal_type: GoalType,
        target: i64,
        description: String,
        platform: Option<Platform>,
        initial_rating: Option<i64>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: now.timestamp_millis().to_string(),
            goal_type,
            target,
            description,
            platform,
            initial_rating,
            progress: 0,
            completed: false,
            completed_at: None,
            created_at: now,
        }
    }
}

impl Store {
    pub fn put_goal(&self, goal: &Goal) -> Result<(), StoreError> {
        if goal.goal_type == GoalType::Rating && goal.platform.is_none() {
            return Err(StoreError::Validation(
                "rating goals require a platform".to_string(),
            ));
        }
        self.goals
            .insert(keys::goal_key(&goal.id).as_bytes(), Self::serialize(goal)?)?;
        Ok(())
    }

    pub fn get_goal(&self, goal_id: &str) -> Result<Option<Goal>, StoreError> {
        match self.goals.get(keys::goal_key(goal_id).as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn list_goals(&self) -> Result<Vec<Goal>, StoreError> {
        let mut goals = Vec::new();
        for item in self.goals.iter() {
            let (_, value) = item?;
            goals.push(Self::deserialize(&value)?);
        }
        Ok(goals)
    }

    pub fn delete_goal(&self, goal_id: &str) -> Result<bool, StoreError> {
        Ok(self
            .goals
            .remove(keys::goal_key(goal_id).as_bytes())?
            .is_some())
    }
}
