pub mod achievements;
pub mod analytics;
pub mod config;
pub mod export;
pub mod goals;
pub mod health;
pub mod ratings;
pub mod stats;
pub mod sync;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};

use crate::response::ErrorBody;
use crate::state::AppState;

/// Maximum request body size: 256 KiB. Requests here are small config and
/// goal payloads; bulk data only ever flows outward.
const MAX_BODY_SIZE: usize = 256 * 1024;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/sync", sync::router())
        .nest("/stats", stats::router())
        .nest("/logs", stats::logs_router())
        .nest("/ratings", ratings::router())
        .nest("/analytics", analytics::router())
        .nest("/goals", goals::router())
        .nest("/achievements", achievements::router())
        .nest("/config", config::router())
        .nest("/export", export::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE));

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health::router())
        .fallback(fallback_404)
        .with_state(state)
}

async fn fallback_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            success: false,
            code: "NOT_FOUND".to_string(),
            message: "Not found".to_string(),
        }),
    )
}
