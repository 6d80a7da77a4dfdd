//! Events API routes
//!
//! This module wires up the events domain to HTTP routes.

use axum::Router;
use domain_events::{EventService, MongoEventRepository};
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

/// Create the events router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoEventRepository::new(&state.db);

    // Create the service
    let service = EventService::new(repository);

    // Use the domain's router
    domain_events::events_router().with_state(Arc::new(service))
}

/// Initialize event indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoEventRepository::new(db);
    repository
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create event indexes: {}", e))?;
    info!("Event collection indexes created");
    Ok(())
}
