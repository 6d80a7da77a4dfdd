//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc, to_bson};
use mongodb::{Collection, Database, IndexModel};
use tracing::instrument;
use uuid::Uuid;

use crate::error::EventResult;
use crate::models::{Event, EventFilter};
use crate::repository::EventRepository;

/// MongoDB-based event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<Event>,
}

impl MongoEventRepository {
    /// Create a new MongoDB event repository
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("events"),
        }
    }

    /// Create indexes for efficient querying
    pub async fn create_indexes(&self) -> EventResult<()> {
        let indexes = vec![
            // Listing is always newest-first
            IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
            // Index on tags for tag-based filtering
            IndexModel::builder().keys(doc! { "tags": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    /// Build a MongoDB filter document from EventFilter
    fn build_filter(filter: &EventFilter) -> Document {
        let mut doc = Document::new();

        if let Some(ref search) = filter.search
            && !search.is_empty()
        {
            let pattern = regex::escape(search);
            doc.insert(
                "$or",
                vec![
                    doc! { "title": { "$regex": pattern.as_str(), "$options": "i" } },
                    doc! { "description": { "$regex": pattern.as_str(), "$options": "i" } },
                    doc! { "location": { "$regex": pattern.as_str(), "$options": "i" } },
                ],
            );
        }

        if let Some(ref tag) = filter.tag
            && !tag.is_empty()
        {
            doc.insert("tags", doc! { "$in": [tag.as_str()] });
        }

        doc
    }

    fn id_filter(id: &Uuid) -> EventResult<Document> {
        Ok(doc! { "_id": to_bson(id)? })
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn create(&self, event: Event) -> EventResult<Event> {
        self.collection.insert_one(&event).await?;

        tracing::info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &Uuid) -> EventResult<Option<Event>> {
        let event = self.collection.find_one(Self::id_filter(id)?).await?;
        Ok(event)
    }

    #[instrument(skip(self, filter))]
    async fn list(&self, filter: &EventFilter) -> EventResult<Vec<Event>> {
        use mongodb::options::FindOptions;

        let query = Self::build_filter(filter);
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();

        let cursor = self.collection.find(query).with_options(options).await?;
        let events: Vec<Event> = cursor.try_collect().await?;
        Ok(events)
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: &Event) -> EventResult<()> {
        self.collection
            .replace_one(Self::id_filter(&event.id)?, event)
            .await?;

        tracing::info!(event_id = %event.id, "Event updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &Uuid) -> EventResult<Option<Event>> {
        let deleted = self
            .collection
            .find_one_and_delete(Self::id_filter(id)?)
            .await?;

        if deleted.is_some() {
            tracing::info!(event_id = %id, "Event deleted");
        }
        Ok(deleted)
    }
}
