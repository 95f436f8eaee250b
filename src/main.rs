// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitness Activity API Server
//!
//! Records fitness activities for validated users and announces them to
//! downstream consumers through the activity topic.

use fitness_activity::{
    config::{Config, StoreBackend},
    db::{ActivityStore, FirestoreDb, MemoryStore},
    services::{ActivityService, IdentityClient, RestProxyPublisher},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Fitness Activity API");

    let store: Arc<dyn ActivityStore> = match config.store {
        StoreBackend::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory activity store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let identity = IdentityClient::new(&config.identity)?;
    tracing::info!(
        base_url = %config.identity.base_url,
        "Identity service client initialized"
    );

    let publisher = RestProxyPublisher::new(&config.events)?;
    tracing::info!(
        broker = %config.events.broker_url,
        topic = %config.events.topic_name,
        "Activity event publisher initialized"
    );

    let activities = ActivityService::new(
        Arc::new(identity.clone()),
        store,
        Arc::new(publisher),
        &config.events,
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        activities,
        identity,
    });

    // Build router
    let app = fitness_activity::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitness_activity=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
