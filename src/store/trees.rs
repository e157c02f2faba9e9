// Local partition: bulky history and derived state.
pub const PLATFORM_STATS: &str = "platform_stats";
pub const DAILY_LOGS: &str = "daily_logs";
pub const RATING_HISTORY: &str = "rating_history";
pub const COMBINED_RATINGS: &str = "combined_ratings";
pub const DERIVED: &str = "derived";
pub const ACHIEVEMENTS: &str = "achievements";

// Synced partition: small user-owned records.
pub const GOALS: &str = "goals";
pub const USER_CONFIG: &str = "user_config";
