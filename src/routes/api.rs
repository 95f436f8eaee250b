// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity API routes.

use crate::error::{AppError, Result};
use crate::middleware::RequestUser;
use crate::models::{ActivityRequest, ActivityResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;
use validator::Validate;

/// Activity routes. `attach_user` is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(get_activities).post(track_activity))
        .route("/api/activities/{activity_id}", get(get_activity))
}

/// Record a new activity.
///
/// The gateway-supplied `X-User-ID` wins over any `userId` in the body.
/// Either way the id is trimmed, so both sources reach the validator alike.
async fn track_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<RequestUser>,
    Json(mut request): Json<ActivityRequest>,
) -> Result<Json<ActivityResponse>> {
    request.user_id = match user.user_id {
        Some(user_id) => user_id,
        None => request.user_id.trim().to_string(),
    };
    request.validate()?;

    let response = state.activities.track_activity(request).await?;
    Ok(Json(response))
}

/// List the caller's activities.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<RequestUser>,
) -> Result<Json<Vec<ActivityResponse>>> {
    let user_id = user.require()?;
    let activities = state.activities.get_user_activities(user_id).await?;
    Ok(Json(activities))
}

/// Get one activity by id.
async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<String>,
) -> Result<Json<ActivityResponse>> {
    if activity_id.len() > 128 {
        return Err(AppError::BadRequest("Invalid activity id".to_string()));
    }
    let activity = state.activities.get_activity(&activity_id).await?;
    Ok(Json(activity))
}
