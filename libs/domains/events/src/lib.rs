//! Events Domain
//!
//! A complete domain implementation for managing community events with
//! MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic (no duplicate attendees)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_events::{MongoEventRepository, EventService, events_router};
//! use mongodb::Client;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("meetup");
//!
//! let repository = MongoEventRepository::new(&db);
//! let service = EventService::new(repository);
//!
//! let router: axum::Router = events_router().with_state(Arc::new(service));
//! # Ok(())
//! # }
//! ```

use utoipa::OpenApi;

mod error;
mod handlers;
mod models;
mod mongodb;
mod repository;
mod service;

pub use error::{EventError, EventResult};
pub use handlers::{EventsState, MessageResponse, events_router};
pub use models::{CreateEvent, Event, EventFilter, RsvpRequest};
pub use repository::EventRepository;
pub use self::mongodb::MongoEventRepository;
pub use service::EventService;

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_events,
        handlers::create_event,
        handlers::get_event,
        handlers::rsvp_event,
        handlers::delete_event,
    ),
    components(
        schemas(Event, CreateEvent, RsvpRequest, EventFilter, MessageResponse),
        responses(
            axum_helpers::errors::responses::NotFoundResponse,
            axum_helpers::errors::responses::BadRequestValidationResponse,
            axum_helpers::errors::responses::InternalServerErrorResponse,
        )
    ),
    tags(
        (name = "events", description = "Community event management endpoints")
    )
)]
pub struct ApiDoc;
