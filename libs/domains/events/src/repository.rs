//! Event repository trait

use crate::error::EventResult;
use crate::models::{Event, EventFilter};
use async_trait::async_trait;
use uuid::Uuid;

/// Repository trait for event storage operations
///
/// Implementations can use different storage backends (MongoDB in production,
/// a mock in tests).
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a new event
    async fn create(&self, event: Event) -> EventResult<Event>;

    /// Get event by id
    async fn get_by_id(&self, id: &Uuid) -> EventResult<Option<Event>>;

    /// List events matching the filter, newest first
    async fn list(&self, filter: &EventFilter) -> EventResult<Vec<Event>>;

    /// Replace the stored document with the given event
    async fn update(&self, event: &Event) -> EventResult<()>;

    /// Delete event by id, returning the removed document
    async fn delete(&self, id: &Uuid) -> EventResult<Option<Event>>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub EventRepository {}

        #[async_trait]
        impl EventRepository for EventRepository {
            async fn create(&self, event: Event) -> EventResult<Event>;
            async fn get_by_id(&self, id: &Uuid) -> EventResult<Option<Event>>;
            async fn list(&self, filter: &EventFilter) -> EventResult<Vec<Event>>;
            async fn update(&self, event: &Event) -> EventResult<()>;
            async fn delete(&self, id: &Uuid) -> EventResult<Option<Event>>;
        }
    }
}
