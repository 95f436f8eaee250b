// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory activity store for local development and tests.

use super::{new_activity_id, ActivityStore};
use crate::error::AppError;
use crate::models::{Activity, NewActivity};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Activities grouped by owning user, in insertion order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    by_user: Arc<DashMap<String, Vec<Activity>>>,
    /// activity id -> owning user id
    owners: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored activities across all users.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn save(&self, activity: NewActivity) -> Result<Activity, AppError> {
        let stored = activity.into_stored(new_activity_id(), chrono::Utc::now());

        self.by_user
            .entry(stored.user_id.clone())
            .or_default()
            .push(stored.clone());
        self.owners.insert(stored.id.clone(), stored.user_id.clone());

        Ok(stored)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Activity>, AppError> {
        Ok(self
            .by_user
            .get(user_id)
            .map(|activities| activities.clone())
            .unwrap_or_default())
    }

    async fn find_by_id(&self, activity_id: &str) -> Result<Option<Activity>, AppError> {
        // Clone the owner out so no shard guard is held across the second lookup.
        let Some(user_id) = self.owners.get(activity_id).map(|o| o.clone()) else {
            return Ok(None);
        };

        Ok(self.by_user.get(&user_id).and_then(|activities| {
            activities
                .iter()
                .find(|a| a.id == activity_id)
                .cloned()
        }))
    }
}
