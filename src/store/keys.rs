use crate::connectors::Platform;

pub fn platform_key(platform: Platform) -> &'static str {
    platform.as_str()
}

/// Daily log keys are the "YYYY-MM-DD" date itself, so sled's lexicographic
/// order is chronological and range scans stay cheap.
pub fn daily_log_key(date: &str) -> String {
    date.to_string()
}

pub fn combined_rating_key(date: &str) -> String {
    date.to_string()
}

pub fn goal_key(goal_id: &str) -> String {
    goal_id.to_string()
}

pub fn achievement_key(achievement_id: &str) -> String {
    achievement_id.to_string()
}

pub const USER_CONFIG_KEY: &str = "config";
pub const AGGREGATED_KEY: &str = "aggregated";
pub const LAST_SYNC_KEY: &str = "last_sync";
pub const LAST_REPORT_KEY: &str = "last_report";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_keys_sort_chronologically() {
        assert!(daily_log_key("2024-01-09") < daily_log_key("2024-01-10"));
        assert!(daily_log_key("2024-12-31") < daily_log_key("2025-01-01"));
    }
}
