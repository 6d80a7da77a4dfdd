//! Application state management.
//!
//! This module defines the shared application state passed to request
//! handlers:
//! - Configuration
//! - MongoDB client

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloned for each handler (inexpensive Arc clones), providing access to the
/// application configuration and the MongoDB client and database.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
}
