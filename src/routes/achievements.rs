use axum::extract::State;
use axum::routing::get;
use axum::Router;

use crate::goals::{AchievementDef, CATALOG};
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_achievements))
        .route("/catalog", get(list_catalog))
}

fn def_json(def: &AchievementDef) -> serde_json::Value {
    serde_json::json!({
        "id": def.id,
        "name": def.name,
        "description": def.description,
        "icon": def.icon,
        "threshold": def.threshold,
    })
}

/// Earned achievements plus the remaining locked catalog entries, so the
/// client can render both without knowing the catalog.
async fn list_achievements(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let earned = state.store().list_achievements()?;
    let earned_ids = state.store().earned_achievement_ids()?;

    let locked: Vec<serde_json::Value> = CATALOG
        .iter()
        .filter(|def| !earned_ids.contains(def.id))
        .map(def_json)
        .collect();

    Ok(ok(serde_json::json!({
        "earned": earned,
        "locked": locked,
    })))
}

async fn list_catalog() -> impl axum::response::IntoResponse {
    let defs: Vec<serde_json::Value> = CATALOG.iter().map(def_json).collect();
    ok(defs)
}
