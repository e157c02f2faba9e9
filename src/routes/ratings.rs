use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;

use crate::response::{ok, AppError};
use crate::routes::stats::parse_platform;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(combined_ratings))
        .route("/:platform", get(platform_ratings))
}

async fn combined_ratings(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entries = state.store().list_combined_ratings()?;
    Ok(ok(entries))
}

async fn platform_ratings(
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let platform = parse_platform(&platform)?;
    let history = state.store().get_rating_history(platform)?;
    Ok(ok(history))
}
