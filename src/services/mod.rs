// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod events;
pub mod identity;

pub use activity::ActivityService;
pub use events::{EventPublisher, PublishError, RestProxyPublisher};
pub use identity::{IdentityClient, IdentityError, UserValidator};
