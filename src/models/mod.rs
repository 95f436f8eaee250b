// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod user;

pub use activity::{Activity, ActivityRequest, ActivityResponse, ActivityType, NewActivity};
pub use user::{RegisterRequest, UserResponse};
