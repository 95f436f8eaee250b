// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity event publishing.
//!
//! Every stored activity is announced on a broker topic, keyed by the owning
//! user, so downstream consumers (recommendations) can pick it up. Delivery is
//! advisory: the store is the source of truth, and callers treat a
//! `PublishError` as something to log, not to act on.
//!
//! The production publisher talks to a Kafka REST Proxy (v2 produce API).

use crate::config::EventsConfig;
use crate::error::AppError;
use crate::models::Activity;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Content type for JSON-embedded records in the REST Proxy v2 API.
const KAFKA_JSON_V2: &str = "application/vnd.kafka.json.v2+json";

/// Why an activity event was not delivered.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("broker unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("broker rejected event (HTTP {status}): {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("broker failed to store record: {0}")]
    Record(String),

    #[error("malformed produce response {body:?}: {source}")]
    MalformedResponse {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Emits "activity recorded" events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Make one delivery attempt. No retries.
    async fn publish(&self, topic: &str, key: &str, activity: &Activity)
        -> Result<(), PublishError>;
}

/// Produce request body: a batch with a single keyed record.
#[derive(Serialize)]
struct ProduceRequest<'a> {
    records: [ProduceRecord<'a>; 1],
}

#[derive(Serialize)]
struct ProduceRecord<'a> {
    key: &'a str,
    value: serde_json::Value,
}

/// Produce response. Per-record failures come back with a 200 status.
#[derive(Debug, Deserialize)]
struct ProduceResponse {
    #[serde(default)]
    offsets: Vec<RecordOffset>,
}

#[derive(Debug, Deserialize)]
struct RecordOffset {
    #[serde(default)]
    partition: Option<i32>,
    #[serde(default)]
    offset: Option<i64>,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error: Option<String>,
}

/// Publisher backed by a Kafka REST Proxy.
#[derive(Clone)]
pub struct RestProxyPublisher {
    http: reqwest::Client,
    broker_url: String,
}

impl RestProxyPublisher {
    pub fn new(config: &EventsConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.publish_timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            broker_url: config.broker_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl EventPublisher for RestProxyPublisher {
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        activity: &Activity,
    ) -> Result<(), PublishError> {
        let body = serde_json::to_vec(&ProduceRequest {
            records: [ProduceRecord {
                key,
                value: serde_json::to_value(activity)?,
            }],
        })?;

        let url = format!("{}/topics/{}", self.broker_url, urlencoding::encode(topic));
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, KAFKA_JSON_V2)
            .header(reqwest::header::ACCEPT, KAFKA_JSON_V2)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Rejected { status, body });
        }

        let body = response.text().await?;
        let produced: ProduceResponse = match serde_json::from_str(&body) {
            Ok(produced) => produced,
            Err(source) => return Err(PublishError::MalformedResponse { body, source }),
        };
        if let Some(failed) = produced
            .offsets
            .iter()
            .find(|o| o.error_code.is_some() || o.error.is_some())
        {
            return Err(PublishError::Record(
                failed
                    .error
                    .clone()
                    .unwrap_or_else(|| format!("error code {}", failed.error_code.unwrap_or(-1))),
            ));
        }

        if let Some(record) = produced.offsets.first() {
            tracing::debug!(
                topic,
                key,
                partition = ?record.partition,
                offset = ?record.offset,
                "Activity event acknowledged"
            );
        }
        Ok(())
    }
}
