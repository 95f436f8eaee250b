// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use fitness_activity::config::Config;
use fitness_activity::db::{ActivityStore, FirestoreDb, MemoryStore};
use fitness_activity::error::AppError;
use fitness_activity::models::{Activity, NewActivity};
use fitness_activity::routes::create_router;
use fitness_activity::services::{
    ActivityService, EventPublisher, IdentityClient, PublishError, UserValidator,
};
use fitness_activity::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Validator with a fixed answer that counts its calls.
pub struct StaticValidator {
    valid: bool,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl StaticValidator {
    pub fn new(valid: bool) -> Arc<Self> {
        Arc::new(Self {
            valid,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserValidator for StaticValidator {
    async fn validate_user(&self, _user_id: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.valid
    }
}

/// Store wrapper that counts `save` calls reaching the inner store.
pub struct CountingStore {
    inner: Arc<dyn ActivityStore>,
    saves: AtomicUsize,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn memory() -> Arc<Self> {
        Self::wrap(Arc::new(MemoryStore::new()))
    }

    /// Every operation fails with a database error.
    pub fn offline() -> Arc<Self> {
        Self::wrap(Arc::new(FirestoreDb::new_mock()))
    }

    fn wrap(inner: Arc<dyn ActivityStore>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            saves: AtomicUsize::new(0),
        })
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActivityStore for CountingStore {
    async fn save(&self, activity: NewActivity) -> Result<Activity, AppError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(activity).await
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Activity>, AppError> {
        self.inner.find_by_user(user_id).await
    }

    async fn find_by_id(&self, activity_id: &str) -> Result<Option<Activity>, AppError> {
        self.inner.find_by_id(activity_id).await
    }
}

/// One publish attempt as seen by `RecordingPublisher`.
#[derive(Debug, Clone)]
pub struct PublishAttempt {
    pub topic: String,
    pub key: String,
    pub activity: Activity,
}

/// Publisher that reports every attempt on a channel, optionally failing it.
pub struct RecordingPublisher {
    attempts: mpsc::UnboundedSender<PublishAttempt>,
    fail: bool,
}

#[allow(dead_code)]
impl RecordingPublisher {
    pub fn succeeding() -> (Arc<Self>, mpsc::UnboundedReceiver<PublishAttempt>) {
        Self::build(false)
    }

    pub fn failing() -> (Arc<Self>, mpsc::UnboundedReceiver<PublishAttempt>) {
        Self::build(true)
    }

    fn build(fail: bool) -> (Arc<Self>, mpsc::UnboundedReceiver<PublishAttempt>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { attempts: tx, fail }), rx)
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(
        &self,
        topic: &str,
        key: &str,
        activity: &Activity,
    ) -> Result<(), PublishError> {
        let _ = self.attempts.send(PublishAttempt {
            topic: topic.to_string(),
            key: key.to_string(),
            activity: activity.clone(),
        });

        if self.fail {
            return Err(PublishError::Record("simulated broker failure".to_string()));
        }
        Ok(())
    }
}

/// Wait for the next publish attempt from the background task.
#[allow(dead_code)]
pub async fn next_attempt(rx: &mut mpsc::UnboundedReceiver<PublishAttempt>) -> PublishAttempt {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for publish attempt")
        .expect("publisher dropped")
}

/// Give spawned tasks a chance to run, then assert nothing was published.
#[allow(dead_code)]
pub async fn assert_no_attempts(rx: &mut mpsc::UnboundedReceiver<PublishAttempt>) {
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.try_recv().is_err(), "unexpected publish attempt");
}

/// Build the ingestion service around test doubles.
#[allow(dead_code)]
pub fn test_service(
    validator: Arc<dyn UserValidator>,
    store: Arc<dyn ActivityStore>,
    publisher: Arc<dyn EventPublisher>,
) -> ActivityService {
    ActivityService::new(validator, store, publisher, &Config::test_default().events)
}

/// Create a test app around the given doubles.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(
    validator: Arc<dyn UserValidator>,
    store: Arc<dyn ActivityStore>,
    publisher: Arc<dyn EventPublisher>,
) -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default(), validator, store, publisher)
}

#[allow(dead_code)]
pub fn create_test_app_with_config(
    config: Config,
    validator: Arc<dyn UserValidator>,
    store: Arc<dyn ActivityStore>,
    publisher: Arc<dyn EventPublisher>,
) -> (axum::Router, Arc<AppState>) {
    let identity = IdentityClient::new(&config.identity).expect("identity client");
    let activities = ActivityService::new(validator, store, publisher, &config.events);

    let state = Arc::new(AppState {
        config,
        activities,
        identity,
    });

    (create_router(state.clone()), state)
}

/// Serve `app` on an ephemeral local port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_stub(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    format!("http://{}", addr)
}

/// A local URL with nothing listening behind it.
#[allow(dead_code)]
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}", addr)
}
