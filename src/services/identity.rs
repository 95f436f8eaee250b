// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity (user) service client.
//!
//! Handles:
//! - User validation before an activity is accepted (fails closed)
//! - Registration forwarding for the gateway flow

use crate::config::IdentityConfig;
use crate::error::AppError;
use crate::models::{RegisterRequest, UserResponse};
use async_trait::async_trait;

/// Decides whether a user id belongs to a known user.
///
/// Implementations never fail: anything short of a positive answer is `false`.
#[async_trait]
pub trait UserValidator: Send + Sync {
    async fn validate_user(&self, user_id: &str) -> bool;
}

/// Why a validation call could not produce an answer.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed validation body {body:?}: {source}")]
    Body {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

/// HTTP client for the identity service.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    /// Create a client. The configured timeout bounds every call.
    pub fn new(config: &IdentityConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Ask the identity service about `user_id`.
    ///
    /// `Ok(true)` only for a 2xx response whose body is JSON `true`;
    /// a JSON `null` body counts as `false`.
    pub async fn check_user(&self, user_id: &str) -> Result<bool, IdentityError> {
        let url = format!(
            "{}/api/users/{}/validate",
            self.base_url,
            urlencoding::encode(user_id)
        );

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(IdentityError::Status { status, body });
        }

        match serde_json::from_str::<Option<bool>>(body.trim()) {
            Ok(parsed) => Ok(parsed.unwrap_or(false)),
            Err(source) => Err(IdentityError::Body { body, source }),
        }
    }

    /// Forward a registration to the identity service.
    pub async fn register_user(&self, request: &RegisterRequest) -> Result<UserResponse, AppError> {
        tracing::info!(email = %request.email, "Registering user");

        let url = format!("{}/api/users/register", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::IdentityService(format!("Registration request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::BadRequest(format!("Bad request : {}", body)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Registration rejected by identity service");
            return Err(AppError::IdentityService(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::IdentityService(format!("Invalid user profile: {}", e)))
    }
}

#[async_trait]
impl UserValidator for IdentityClient {
    async fn validate_user(&self, user_id: &str) -> bool {
        tracing::info!(user_id, "Validating user");

        match self.check_user(user_id).await {
            Ok(valid) => {
                tracing::info!(user_id, valid, "User validation result");
                valid
            }
            Err(IdentityError::Status { status, body }) => {
                tracing::error!(
                    user_id,
                    status = %status,
                    body = %body,
                    "Identity service rejected validation request"
                );
                false
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "User validation failed");
                false
            }
        }
    }
}
