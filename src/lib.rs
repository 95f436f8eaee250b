// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness activity service.
//!
//! This crate provides the backend API for recording fitness activities:
//! the submitting user is checked against the identity service, the activity
//! is stored, and an event is published for downstream processing such as
//! recommendation generation.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{ActivityService, IdentityClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub activities: ActivityService,
    /// Used directly for registration forwarding.
    pub identity: IdentityClient,
}
