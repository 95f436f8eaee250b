// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity ingestion service.
//!
//! Handles the core workflow:
//! 1. Validate the submitting user against the identity service
//! 2. Store the activity
//! 3. Announce it on the activity topic (fire-and-forget)
//! 4. Map the stored record to the API response
//!
//! A user the identity service cannot vouch for stops the request before
//! anything is written. A storage failure stops it before anything is
//! published. A publish failure is only logged.

use crate::config::EventsConfig;
use crate::db::ActivityStore;
use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityRequest, ActivityResponse, NewActivity};
use crate::services::{EventPublisher, UserValidator};
use std::sync::Arc;

/// Orchestrates validation, storage and event publishing for activities.
#[derive(Clone)]
pub struct ActivityService {
    validator: Arc<dyn UserValidator>,
    store: Arc<dyn ActivityStore>,
    publisher: Arc<dyn EventPublisher>,
    topic: String,
}

impl ActivityService {
    pub fn new(
        validator: Arc<dyn UserValidator>,
        store: Arc<dyn ActivityStore>,
        publisher: Arc<dyn EventPublisher>,
        events: &EventsConfig,
    ) -> Self {
        Self {
            validator,
            store,
            publisher,
            topic: events.topic_name.clone(),
        }
    }

    /// Validate, store and announce a new activity.
    pub async fn track_activity(&self, request: ActivityRequest) -> Result<ActivityResponse> {
        let user_id = request.user_id.clone();

        if !self.validator.validate_user(&user_id).await {
            tracing::warn!(user_id = %user_id, "Rejecting activity for invalid user");
            return Err(AppError::InvalidUser(user_id));
        }

        let activity = NewActivity::from(request);
        flag_implausible_values(&activity);

        let saved = self.store.save(activity).await?;
        tracing::info!(
            activity_id = %saved.id,
            user_id = %saved.user_id,
            activity_type = ?saved.activity_type,
            "Activity recorded"
        );

        self.dispatch_event(saved.clone());

        Ok(ActivityResponse::from(saved))
    }

    /// All activities for a user. No identity check on the read path.
    pub async fn get_user_activities(&self, user_id: &str) -> Result<Vec<ActivityResponse>> {
        let activities = self.store.find_by_user(user_id).await?;
        tracing::debug!(user_id, count = activities.len(), "Fetched user activities");

        Ok(activities.into_iter().map(ActivityResponse::from).collect())
    }

    /// Single activity by id.
    pub async fn get_activity(&self, activity_id: &str) -> Result<ActivityResponse> {
        self.store
            .find_by_id(activity_id)
            .await?
            .map(ActivityResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", activity_id)))
    }

    /// Publish the event on a background task; the caller never waits for it.
    fn dispatch_event(&self, activity: Activity) {
        let publisher = Arc::clone(&self.publisher);
        let topic = self.topic.clone();

        tokio::spawn(async move {
            let result = publisher.publish(&topic, &activity.user_id, &activity).await;

            // Delivery is advisory; the activity is already stored.
            match result {
                Ok(()) => tracing::debug!(
                    topic = %topic,
                    activity_id = %activity.id,
                    "Activity event published"
                ),
                Err(e) => tracing::error!(
                    topic = %topic,
                    activity_id = %activity.id,
                    user_id = %activity.user_id,
                    error = %e,
                    "Failed to publish activity event"
                ),
            }
        });
    }
}

/// Log activities with values that are accepted but probably wrong.
fn flag_implausible_values(activity: &NewActivity) {
    if activity.duration <= 0 || activity.calories_burned < 0 {
        tracing::warn!(
            user_id = %activity.user_id,
            duration = activity.duration,
            calories_burned = activity.calories_burned,
            "Activity has non-positive duration or negative calories"
        );
    }
}
