use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;

use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::sync::SyncError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(trigger_sync))
        .route("/status", get(sync_status))
}

async fn trigger_sync(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let report = state.sync_engine().run().await.map_err(|err| match err {
        SyncError::NoUsernames => {
            AppError::bad_request("NO_USERNAMES", "No platform usernames configured")
        }
        SyncError::Store(store_err) => store_err.into(),
    })?;
    Ok(ok(report))
}

async fn sync_status(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let last_sync = state.store().get_last_sync()?;
    let last_report = state.store().get_sync_report()?;
    Ok(ok(serde_json::json!({
        "lastSync": last_sync,
        "lastReport": last_report,
    })))
}
