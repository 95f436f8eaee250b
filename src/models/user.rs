//! User registration models exchanged with the identity service.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request forwarded to the identity service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid Email"))]
    pub email: String,
    /// Identity provider subject for this user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keycloak_id: Option<String>,
    #[validate(length(min = 6, message = "Minimum length should be 6"))]
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// User profile as returned by the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub keycloak_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Timestamps are passed through as the identity service formats them.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
