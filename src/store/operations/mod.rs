pub mod achievements;
pub mod daily_logs;
pub mod derived;
pub mod goals;
pub mod platform_stats;
pub mod rating_history;
pub mod user_config;
