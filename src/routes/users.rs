// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User registration forwarding.

use crate::error::Result;
use crate::models::{RegisterRequest, UserResponse};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users/register", post(register))
}

/// Validate the registration locally, then hand it to the identity service.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserResponse>> {
    request.validate()?;
    let user = state.identity.register_user(&request).await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(Json(user))
}
