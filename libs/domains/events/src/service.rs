//! Event service - business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, Event, EventFilter};
use crate::repository::EventRepository;

/// Event service orchestrating repository operations.
///
/// Holds the one business rule of the domain: an event never lists the same
/// attendee twice.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    /// Create a new EventService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Ids arrive as raw path strings; anything that does not parse cannot
    /// match a stored document, so it is reported as not found.
    fn parse_id(id: &str) -> EventResult<Uuid> {
        Uuid::parse_str(id).map_err(|_| EventError::NotFound(id.to_string()))
    }

    /// Create and persist a new event
    #[instrument(skip(self, input), fields(event_title = %input.title))]
    pub async fn create(&self, input: CreateEvent) -> EventResult<Event> {
        self.repository.create(Event::new(input)).await
    }

    /// List events matching the filter, newest first
    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: &EventFilter) -> EventResult<Vec<Event>> {
        self.repository.list(filter).await
    }

    /// Get a single event by id
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> EventResult<Event> {
        let event_id = Self::parse_id(id)?;
        self.repository
            .get_by_id(&event_id)
            .await?
            .ok_or_else(|| EventError::NotFound(id.to_string()))
    }

    /// Add an attendee to an event.
    ///
    /// The empty-attendee check is repeated here even though the HTTP layer
    /// already rejects such requests. Adding an attendee that is already on
    /// the list is a no-op returning the unchanged event.
    ///
    /// Concurrent calls against the same event race on the read-modify-write
    /// of the attendees list; last write wins.
    #[instrument(skip(self))]
    pub async fn add_attendee(&self, id: &str, attendee: &str) -> EventResult<Event> {
        let mut event = self.get_by_id(id).await?;

        if attendee.is_empty() {
            return Err(EventError::Validation(
                "Attendee name or email is required".to_string(),
            ));
        }

        if !event.add_attendee(attendee) {
            return Ok(event);
        }

        self.repository.update(&event).await?;
        Ok(event)
    }

    /// Delete an event, returning the removed document
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> EventResult<Event> {
        let event_id = Self::parse_id(id)?;
        self.repository
            .delete(&event_id)
            .await?
            .ok_or_else(|| EventError::NotFound(id.to_string()))
    }
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
