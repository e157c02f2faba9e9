use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;
use chrono::Local;
use serde::Deserialize;

use crate::analytics::aggregate::compute_aggregates;
use crate::analytics::compare::compare_timeframe;
use crate::analytics::insights::build_insights;
use crate::analytics::streaks::compute_streaks;
use crate::constants::{DAILY_LOG_CAP, DEFAULT_LOG_DAYS, WEEKDAY_INSIGHT_WINDOW};
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/streaks", get(streaks))
        .route("/compare", get(compare))
        .route("/insights", get(insights))
}

async fn streaks(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let logs = state.store().list_daily_logs(DAILY_LOG_CAP)?;
    let summary = compute_streaks(&logs, Local::now().date_naive());
    Ok(ok(summary))
}

#[derive(Debug, Deserialize)]
struct CompareQuery {
    days: Option<u32>,
}

async fn compare(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let days = query.days.unwrap_or(DEFAULT_LOG_DAYS as u32);
    if days < 2 || days as usize > DAILY_LOG_CAP {
        return Err(AppError::bad_request(
            "INVALID_DAYS",
            &format!("days must be between 2 and {DAILY_LOG_CAP}"),
        ));
    }

    let logs = state.store().list_daily_logs(DAILY_LOG_CAP)?;
    let comparison = compare_timeframe(&logs, days, Local::now().date_naive());
    Ok(ok(comparison))
}

async fn insights(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let logs = state.store().list_daily_logs(WEEKDAY_INSIGHT_WINDOW)?;
    let combined = state.store().list_combined_ratings()?;
    let all_stats = state.store().list_platform_stats()?;

    // Prefer the stored snapshot; fall back to an on-the-fly computation
    // before the first sync has run.
    let mastery = match state.store().get_aggregated_stats()? {
        Some(agg) => agg.category_mastery,
        None => compute_aggregates(&all_stats, chrono::Utc::now()).category_mastery,
    };

    let bundle = build_insights(&logs, &combined, &mastery, &all_stats);
    Ok(ok(bundle))
}
