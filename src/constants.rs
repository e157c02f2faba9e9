/// Maximum number of daily log entries retained (most recent dates win).
pub const DAILY_LOG_CAP: usize = 365;

/// Number of longest streak runs returned by the streak summary.
pub const TOP_STREAK_RUNS: usize = 5;

/// Daily log entries considered for the most-productive-weekday insight.
pub const WEEKDAY_INSIGHT_WINDOW: usize = 30;

/// Combined rating history points used for trend detection.
pub const RATING_TREND_POINTS: usize = 5;

/// Average per-contest rating delta above which the trend counts as upward.
pub const RATING_TREND_UP: f64 = 20.0;

/// Average per-contest rating delta below which the trend needs attention.
pub const RATING_TREND_DOWN: f64 = -20.0;

/// Default window for the daily-log listing endpoint.
pub const DEFAULT_LOG_DAYS: usize = 30;

/// Allowed sync periods, in hours.
pub const SYNC_PERIODS_HOURS: &[u64] = &[1, 6, 12, 24];
