// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything the ingestion pipeline needs to reach its collaborators (the
//! identity service, the broker and the activity store) is read once at
//! startup and handed to the services at construction time.

use std::env;
use std::time::Duration;

/// Default topic for "new activity recorded" events.
pub const DEFAULT_ACTIVITY_TOPIC: &str = "activity-events";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Which activity store backend to use
    pub store: StoreBackend,
    pub identity: IdentityConfig,
    pub events: EventsConfig,
}

/// Connection settings for the identity (user) service.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL, e.g. `http://user-service:8081`
    pub base_url: String,
    /// Per-request timeout for validation and registration calls
    pub timeout: Duration,
}

/// Connection settings for activity event publishing.
#[derive(Debug, Clone)]
pub struct EventsConfig {
    /// Broker REST proxy base URL
    pub broker_url: String,
    /// Destination topic for activity events
    pub topic_name: String,
    /// Per-request timeout for produce calls
    pub publish_timeout: Duration,
}

/// Activity store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid("ACTIVITY_STORE", s.to_string())),
        }
    }
}

impl Config {
    /// Config for tests only. Collaborator URLs point at nothing.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            store: StoreBackend::Memory,
            identity: IdentityConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                timeout: Duration::from_secs(2),
            },
            events: EventsConfig {
                broker_url: "http://127.0.0.1:9".to_string(),
                topic_name: DEFAULT_ACTIVITY_TOPIC.to_string(),
                publish_timeout: Duration::from_secs(2),
            },
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: parse_or("PORT", 8080)?,
            store: env::var("ACTIVITY_STORE")
                .unwrap_or_else(|_| "firestore".to_string())
                .parse()?,
            identity: IdentityConfig {
                base_url: required_url("USER_SERVICE_URL")?,
                timeout: Duration::from_secs(parse_or("IDENTITY_TIMEOUT_SECS", 5)?),
            },
            events: EventsConfig {
                broker_url: required_url("BROKER_URL")?,
                topic_name: env::var("ACTIVITY_TOPIC")
                    .map(|v| v.trim().to_string())
                    .unwrap_or_else(|_| DEFAULT_ACTIVITY_TOPIC.to_string()),
                publish_timeout: Duration::from_secs(parse_or("PUBLISH_TIMEOUT_SECS", 10)?),
            },
        })
    }
}

/// Read a required base URL, dropping any trailing slash.
fn required_url(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .map_err(|_| ConfigError::Missing(name))
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
