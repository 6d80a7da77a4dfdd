//! API routes module
//!
//! This module defines all HTTP API routes for the Meetup API.

pub mod events;
pub mod health;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/events", events::router(state))
        .merge(health::router(state.clone()))
}

/// Liveness text response, kept for clients that probe the root path
async fn root() -> &'static str {
    "Event Management API is running"
}
