// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running and
//! FIRESTORE_EMULATOR_HOST to point at it.

use fitness_activity::db::{ActivityStore, FirestoreDb};
use fitness_activity::models::activity::AdditionalMetrics;
use fitness_activity::models::{ActivityType, NewActivity};
use serde_json::json;

mod common;

/// Generate a unique user ID for test isolation.
fn unique_user_id() -> String {
    format!("it-{}", uuid::Uuid::new_v4())
}

async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

fn new_activity(user_id: &str, activity_type: ActivityType) -> NewActivity {
    let mut metrics = AdditionalMetrics::new();
    metrics.insert("avgHeartRate".to_string(), json!(138));

    NewActivity {
        user_id: user_id.to_string(),
        activity_type,
        duration: 45,
        calories_burned: 390,
        start_time: "2026-03-01T07:30:00Z".parse().unwrap(),
        additional_metrics: metrics,
    }
}

#[tokio::test]
async fn test_save_and_read_back() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    let saved = db
        .save(new_activity(&user_id, ActivityType::Cycling))
        .await
        .expect("save should succeed");

    assert!(!saved.id.is_empty());
    assert_eq!(saved.created_at, saved.updated_at);

    let fetched = db
        .find_by_id(&saved.id)
        .await
        .unwrap()
        .expect("activity should exist");
    assert_eq!(fetched.user_id, user_id);
    assert_eq!(fetched.activity_type, ActivityType::Cycling);
    assert_eq!(fetched.additional_metrics["avgHeartRate"], json!(138));
}

#[tokio::test]
async fn test_find_by_user_scoping() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    let other_user = unique_user_id();

    let first = db
        .save(new_activity(&user_id, ActivityType::Yoga))
        .await
        .unwrap();
    let second = db
        .save(new_activity(&user_id, ActivityType::Yoga))
        .await
        .unwrap();
    db.save(new_activity(&other_user, ActivityType::Stretching))
        .await
        .unwrap();

    let mut ids: Vec<String> = db
        .find_by_user(&user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    ids.sort();
    let mut expected = vec![first.id, second.id];
    expected.sort();
    assert_eq!(ids, expected);

    // Stable across repeated reads of unchanged data.
    let again: Vec<String> = db
        .find_by_user(&user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    let once: Vec<String> = db
        .find_by_user(&user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(again, once);
}

#[tokio::test]
async fn test_unknown_user_and_id() {
    require_emulator!();

    let db = test_db().await;

    assert!(db.find_by_user(&unique_user_id()).await.unwrap().is_empty());
    assert!(db.find_by_id("does-not-exist").await.unwrap().is_none());
}
