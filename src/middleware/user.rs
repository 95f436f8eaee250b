// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Caller identity forwarded by the API gateway.
//!
//! The gateway authenticates the caller and passes the user id along in the
//! `X-User-ID` header. This service does not verify it; the ingestion path
//! checks it against the identity service, the read path trusts it.

use crate::error::AppError;
use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

pub const USER_ID_HEADER: &str = "x-user-id";

/// User id claimed by the caller, if any.
#[derive(Debug, Clone, Default)]
pub struct RequestUser {
    pub user_id: Option<String>,
}

impl RequestUser {
    /// The claimed user id, or a 400 if the request carried none.
    pub fn require(&self) -> Result<&str, AppError> {
        self.user_id
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("Missing X-User-ID header".to_string()))
    }
}

/// Middleware that reads `X-User-ID` into a `RequestUser` extension.
///
/// Rejects blank or unreadable values; an absent header is left for handlers
/// to decide. No other format is imposed on the id.
pub async fn attach_user(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let user_id = user_id_from_headers(request.headers())?;
    request.extensions_mut().insert(RequestUser { user_id });

    Ok(next.run(request).await)
}

fn user_id_from_headers(headers: &HeaderMap) -> Result<Option<String>, StatusCode> {
    let Some(raw) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    let value = raw.to_str().map_err(|_| StatusCode::BAD_REQUEST)?.trim();
    if value.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    Ok(Some(value.to_string()))
}
