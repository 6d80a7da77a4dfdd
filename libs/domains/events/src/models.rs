//! Event domain models

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Event entity - a community event stored in MongoDB.
///
/// Wire and storage field names are camelCase (`imageUrl`, `createdAt`);
/// the id is persisted as `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Event title
    pub title: String,
    /// Event description
    pub description: String,
    /// When the event takes place
    pub date: DateTime<Utc>,
    /// Where the event takes place
    pub location: String,
    /// Optional image for the event page, empty when not provided
    #[serde(default)]
    pub image_url: String,
    /// Free-text labels for categorizing and filtering
    #[serde(default)]
    pub tags: Vec<String>,
    /// Attendee names or emails, no duplicates, insertion order preserved
    #[serde(default)]
    pub attendees: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Create a new event from the CreateEvent DTO.
    ///
    /// Attendees always start empty, whatever the caller sent.
    pub fn new(input: CreateEvent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            date: input.date,
            location: input.location,
            image_url: input.image_url,
            tags: input.tags,
            attendees: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add an attendee if not already on the list.
    ///
    /// Returns `true` when the attendee was appended (and `updated_at`
    /// refreshed), `false` when the value was already present.
    pub fn add_attendee(&mut self, attendee: impl Into<String>) -> bool {
        let attendee = attendee.into();
        if self.attendees.contains(&attendee) {
            return false;
        }
        self.attendees.push(attendee);
        self.updated_at = Utc::now();
        true
    }
}

/// DTO for creating a new event
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    /// Accepts RFC 3339 date-times and plain YYYY-MM-DD dates
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub date: DateTime<Utc>,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[serde(default)]
    pub image_url: String,
    /// Anything that is not a sequence of strings is coerced to empty
    #[serde(default, deserialize_with = "deserialize_lenient_tags")]
    pub tags: Vec<String>,
}

/// Request body for adding an attendee to an event
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RsvpRequest {
    /// Attendee name or email
    #[serde(default)]
    #[validate(length(min = 1, message = "Attendee name or email is required"))]
    pub attendee: String,
}

/// Query filters for listing events
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct EventFilter {
    /// Case-insensitive search across title, description, and location
    pub search: Option<String>,
    /// Only events whose tags contain this value
    pub tag: Option<String>,
}

/// Accept RFC 3339 date-times as well as bare dates (midnight UTC).
fn deserialize_flexible_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| serde::de::Error::custom(format!("invalid date value: {}", raw)))
}

/// Coerce anything that is not a sequence of strings to the empty sequence.
fn deserialize_lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_input() -> CreateEvent {
        serde_json::from_value(json!({
            "title": "Rust Meetup",
            "description": "Monthly talks",
            "date": "2024-06-01T18:00:00Z",
            "location": "Hall A",
            "tags": ["rust", "tech"]
        }))
        .unwrap()
    }

    #[test]
    fn test_new_event_starts_with_empty_attendees() {
        let event = Event::new(create_input());
        assert!(event.attendees.is_empty());
        assert_eq!(event.tags, vec!["rust", "tech"]);
        assert_eq!(event.image_url, "");
        assert!(!event.id.is_nil());
        assert_eq!(event.created_at, event.updated_at);
    }

    #[test]
    fn test_add_attendee_is_idempotent() {
        let mut event = Event::new(create_input());

        assert!(event.add_attendee("a@x.com"));
        assert!(!event.add_attendee("a@x.com"));

        assert_eq!(event.attendees, vec!["a@x.com"]);
    }

    #[test]
    fn test_add_attendee_refreshes_updated_at() {
        let mut event = Event::new(create_input());
        let created = event.created_at;

        event.add_attendee("a@x.com");

        assert!(event.updated_at >= created);
        assert_eq!(event.created_at, created);
    }

    #[test]
    fn test_add_attendee_preserves_insertion_order() {
        let mut event = Event::new(create_input());
        event.add_attendee("c@x.com");
        event.add_attendee("a@x.com");
        event.add_attendee("b@x.com");

        assert_eq!(event.attendees, vec!["c@x.com", "a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_create_event_accepts_bare_date() {
        let input: CreateEvent = serde_json::from_value(json!({
            "title": "Meetup",
            "description": "Talk",
            "date": "2024-01-01",
            "location": "Hall A"
        }))
        .unwrap();

        assert_eq!(input.date.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert!(input.tags.is_empty());
    }

    #[test]
    fn test_create_event_rejects_garbage_date() {
        let result: Result<CreateEvent, _> = serde_json::from_value(json!({
            "title": "Meetup",
            "description": "Talk",
            "date": "soon",
            "location": "Hall A"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_create_event_requires_title() {
        let result: Result<CreateEvent, _> = serde_json::from_value(json!({
            "description": "Talk",
            "date": "2024-01-01",
            "location": "Hall A"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_empty_title_fails_validation() {
        let input: CreateEvent = serde_json::from_value(json!({
            "title": "",
            "description": "Talk",
            "date": "2024-01-01",
            "location": "Hall A"
        }))
        .unwrap();

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_tags_non_sequence_coerced_to_empty() {
        let input: CreateEvent = serde_json::from_value(json!({
            "title": "Meetup",
            "description": "Talk",
            "date": "2024-01-01",
            "location": "Hall A",
            "tags": "not-a-sequence"
        }))
        .unwrap();

        assert!(input.tags.is_empty());
    }

    #[test]
    fn test_tags_keep_duplicates_and_order() {
        let input: CreateEvent = serde_json::from_value(json!({
            "title": "Meetup",
            "description": "Talk",
            "date": "2024-01-01",
            "location": "Hall A",
            "tags": ["b", "a", "b"]
        }))
        .unwrap();

        assert_eq!(input.tags, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_event_serializes_camel_case_with_mongo_id() {
        let event = Event::new(create_input());
        let value = serde_json::to_value(&event).unwrap();

        assert!(value.get("_id").is_some());
        assert!(value.get("imageUrl").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("image_url").is_none());
    }

    #[test]
    fn test_event_round_trips_through_json() {
        let mut event = Event::new(create_input());
        event.add_attendee("a@x.com");

        let value = serde_json::to_value(&event).unwrap();
        let back: Event = serde_json::from_value(value).unwrap();

        assert_eq!(back.id, event.id);
        assert_eq!(back.attendees, event.attendees);
        assert_eq!(back.tags, event.tags);
    }

    #[test]
    fn test_rsvp_request_defaults_to_empty_attendee() {
        let request: RsvpRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.validate().is_err());
    }
}
