use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::Router;
use chrono::Utc;
use serde::Deserialize;

use crate::connectors::Platform;
use crate::extractors::JsonBody;
use crate::response::{created, ok, AppError};
use crate::state::AppState;
use crate::store::operations::goals::{Goal, GoalType};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_goals).post(create_goal))
        .route("/:id", delete(delete_goal))
}

async fn list_goals(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let goals = state.store().list_goals()?;
    Ok(ok(goals))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateGoalRequest {
    goal_type: GoalType,
    target: i64,
    description: String,
    platform: Option<Platform>,
}

async fn create_goal(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateGoalRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if req.target <= 0 {
        return Err(AppError::bad_request(
            "INVALID_TARGET",
            "target must be positive",
        ));
    }
    if req.goal_type == GoalType::Rating && req.platform.is_none() {
        return Err(AppError::bad_request(
            "MISSING_PLATFORM",
            "rating goals require a platform",
        ));
    }

    // Rating goals measure progress against the rating at creation time.
    let initial_rating = match (req.goal_type, req.platform) {
        (GoalType::Rating, Some(platform)) => Some(
            state
                .store()
                .get_platform_stats(platform)?
                .and_then(|s| s.rating)
                .unwrap_or(0),
        ),
        _ => None,
    };

    let goal = Goal::new(
        req.goal_type,
        req.target,
        req.description,
        req.platform,
        initial_rating,
        Utc::now(),
    );
    state.store().put_goal(&goal)?;
    Ok(created(goal))
}

async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if !state.store().delete_goal(&id)? {
        return Err(AppError::not_found(&format!("goal not found: {id}")));
    }
    Ok(ok(serde_json::json!({ "deleted": id })))
}
