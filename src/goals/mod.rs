pub mod catalog;
pub mod engine;

pub use catalog::{AchievementDef, AchievementRule, CATALOG};
pub use engine::{evaluate_achievements, recompute_goals};
