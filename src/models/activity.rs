// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness activity model for storage, events and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Free-form metrics attached to an activity (heart rate, distance, ...).
pub type AdditionalMetrics = HashMap<String, serde_json::Value>;

/// Activity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub enum ActivityType {
    Walking,
    Running,
    Cycling,
    Swimming,
    WeightTraining,
    Yoga,
    Cardio,
    Stretching,
    Others,
}

/// Incoming activity as submitted by a client.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    /// Owning user. Overridden by the `X-User-ID` header when present.
    #[serde(default)]
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Minutes
    pub duration: i32,
    pub calories_burned: i32,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub additional_metrics: AdditionalMetrics,
}

/// An activity that has passed user validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub user_id: String,
    pub activity_type: ActivityType,
    pub duration: i32,
    pub calories_burned: i32,
    pub start_time: DateTime<Utc>,
    pub additional_metrics: AdditionalMetrics,
}

impl From<ActivityRequest> for NewActivity {
    fn from(request: ActivityRequest) -> Self {
        Self {
            user_id: request.user_id,
            activity_type: request.activity_type,
            duration: request.duration,
            calories_burned: request.calories_burned,
            start_time: request.start_time,
            additional_metrics: request.additional_metrics,
        }
    }
}

impl NewActivity {
    /// Attach a store-assigned id and write timestamps.
    pub fn into_stored(self, id: String, now: DateTime<Utc>) -> Activity {
        Activity {
            id,
            user_id: self.user_id,
            activity_type: self.activity_type,
            duration: self.duration,
            calories_burned: self.calories_burned,
            start_time: self.start_time,
            additional_metrics: self.additional_metrics,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Stored activity record. Also the payload of the "activity recorded" event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Store-assigned ID (also used as document ID)
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub duration: i32,
    pub calories_burned: i32,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub additional_metrics: AdditionalMetrics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Activity as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct ActivityResponse {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub duration: i32,
    pub calories_burned: i32,
    pub start_time: DateTime<Utc>,
    pub additional_metrics: AdditionalMetrics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            user_id: activity.user_id,
            activity_type: activity.activity_type,
            duration: activity.duration,
            calories_burned: activity.calories_burned,
            start_time: activity.start_time,
            additional_metrics: activity.additional_metrics,
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        }
    }
}
