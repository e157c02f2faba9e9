use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::connectors::Platform;
use crate::constants::{DAILY_LOG_CAP, DEFAULT_LOG_DAYS};
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stats))
        .route("/aggregated", get(aggregated_stats))
        .route("/:platform", get(platform_stats))
}

pub fn logs_router() -> Router<AppState> {
    Router::new().route("/", get(daily_logs))
}

async fn list_stats(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let all = state.store().list_platform_stats()?;
    Ok(ok(all))
}

async fn platform_stats(
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let platform = parse_platform(&platform)?;
    let stats = state
        .store()
        .get_platform_stats(platform)?
        .ok_or_else(|| AppError::not_found(&format!("no stats for {platform}")))?;
    Ok(ok(stats))
}

async fn aggregated_stats(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let aggregated = state
        .store()
        .get_aggregated_stats()?
        .ok_or_else(|| AppError::not_found("no aggregated stats yet, run a sync first"))?;
    Ok(ok(aggregated))
}

#[derive(Debug, Deserialize)]
struct LogsQuery {
    days: Option<usize>,
}

async fn daily_logs(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let days = query.days.unwrap_or(DEFAULT_LOG_DAYS);
    if days == 0 || days > DAILY_LOG_CAP {
        return Err(AppError::bad_request(
            "INVALID_DAYS",
            &format!("days must be between 1 and {DAILY_LOG_CAP}"),
        ));
    }
    let logs = state.store().list_daily_logs(days)?;
    Ok(ok(logs))
}

pub(crate) fn parse_platform(raw: &str) -> Result<Platform, AppError> {
    Platform::parse(raw).ok_or_else(|| {
        AppError::bad_request("UNKNOWN_PLATFORM", &format!("unknown platform: {raw}"))
    })
}
