use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::connectors::Platform;
use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_config).put(update_config))
}

async fn get_config(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let config = state.store().get_user_config()?;
    Ok(ok(config))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateConfigRequest {
    usernames: Option<BTreeMap<Platform, String>>,
    sync_period_hours: Option<u64>,
    notifications_enabled: Option<bool>,
}

async fn update_config(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateConfigRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut config = state.store().get_user_config()?;

    if let Some(usernames) = req.usernames {
        config.usernames = usernames;
    }
    if let Some(period) = req.sync_period_hours {
        config.sync_period_hours = period;
    }
    if let Some(enabled) = req.notifications_enabled {
        config.notifications_enabled = enabled;
    }

    state.store().set_user_config(&config)?;
    Ok(ok(config))
}
