use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use chrono::Utc;

use crate::connectors::Platform;
use crate::constants::DAILY_LOG_CAP;
use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::store::operations::rating_history::RatingHistoryEntry;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(export_all))
}

/// One self-contained JSON bundle of everything the store holds, for backup
/// or migration to another instance.
async fn export_all(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let store = state.store();

    let mut rating_history: BTreeMap<Platform, Vec<RatingHistoryEntry>> = BTreeMap::new();
    for platform in Platform::ALL {
        let history = store.get_rating_history(platform)?;
        if !history.is_empty() {
            rating_history.insert(platform, history);
        }
    }

    Ok(ok(serde_json::json!({
        "exportedAt": Utc::now(),
        "config": store.get_user_config()?,
        "stats": store.list_platform_stats()?,
        "aggregated": store.get_aggregated_stats()?,
        "dailyLogs": store.list_daily_logs(DAILY_LOG_CAP)?,
        "ratingHistory": rating_history,
        "combinedRatings": store.list_combined_ratings()?,
        "goals": store.list_goals()?,
        "achievements": store.list_achievements()?,
        "lastSync": store.get_last_sync()?,
    })))
}
