//! HTTP handlers for the events API

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};
use axum_helpers::ValidatedJson;
use axum_helpers::errors::responses::{
    BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

use crate::error::EventError;
use crate::models::{CreateEvent, Event, EventFilter, RsvpRequest};
use crate::repository::EventRepository;
use crate::service::EventService;

/// Events router state
pub type EventsState<R> = Arc<EventService<R>>;

/// Confirmation body for destructive operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the events router
pub fn events_router<R: EventRepository + 'static>() -> Router<EventsState<R>> {
    Router::new()
        .route("/", get(list_events::<R>).post(create_event::<R>))
        .route("/{id}", get(get_event::<R>).delete(delete_event::<R>))
        .route("/{id}/rsvp", patch(rsvp_event::<R>))
}

/// List events with optional search and tag filter
#[utoipa::path(
    get,
    path = "/",
    params(EventFilter),
    responses(
        (status = 200, description = "Events, newest first", body = Vec<Event>),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn list_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<Vec<Event>>, EventError> {
    let events = state.list(&filter).await?;
    Ok(Json(events))
}

/// Create a new event
#[utoipa::path(
    post,
    path = "/",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state, create), fields(event_title = %create.title))]
pub async fn create_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    ValidatedJson(create): ValidatedJson<CreateEvent>,
) -> Result<impl IntoResponse, EventError> {
    let event = state.create(create).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Get a single event by id
#[utoipa::path(
    get,
    path = "/{id}",
    params(
        ("id" = String, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn get_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Event>, EventError> {
    let event = state.get_by_id(&id).await?;
    Ok(Json(event))
}

/// Add an attendee to an event (RSVP)
#[utoipa::path(
    patch,
    path = "/{id}/rsvp",
    params(
        ("id" = String, Path, description = "Event id")
    ),
    request_body = RsvpRequest,
    responses(
        (status = 200, description = "Updated event", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state, rsvp))]
pub async fn rsvp_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Path(id): Path<String>,
    ValidatedJson(rsvp): ValidatedJson<RsvpRequest>,
) -> Result<Json<Event>, EventError> {
    let event = state.add_attendee(&id, &rsvp.attendee).await?;
    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/{id}",
    params(
        ("id" = String, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn delete_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, EventError> {
    state.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Event deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockEventRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt; // for oneshot()
    use uuid::Uuid;

    fn app(mock_repo: MockEventRepository) -> Router {
        events_router::<MockEventRepository>()
            .with_state(Arc::new(EventService::new(mock_repo)))
    }

    fn sample_event() -> Event {
        let input: CreateEvent = serde_json::from_value(json!({
            "title": "Rust Meetup",
            "description": "Monthly talks",
            "date": "2024-06-01T18:00:00Z",
            "location": "Hall A",
            "tags": ["rust"]
        }))
        .unwrap();
        Event::new(input)
    }

    async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_event_returns_201_with_empty_attendees() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().returning(|event| Ok(event));

        let app = app(mock_repo);
        let response = app
            .oneshot(json_request(
                "POST",
                "/",
                json!({
                    "title": "Meetup",
                    "description": "Talk",
                    "date": "2024-01-01",
                    "location": "Hall A"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let event: Event = json_body(response.into_body()).await;
        assert!(event.attendees.is_empty());
        assert!(event.tags.is_empty());
        assert!(!event.id.is_nil());
    }

    #[tokio::test]
    async fn test_create_event_missing_required_field_returns_400() {
        // No expectations: nothing may reach the repository
        let app = app(MockEventRepository::new());

        let response = app
            .oneshot(json_request(
                "POST",
                "/",
                json!({
                    "description": "Talk",
                    "date": "2024-01-01",
                    "location": "Hall A"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_event_empty_title_returns_400() {
        let app = app(MockEventRepository::new());

        let response = app
            .oneshot(json_request(
                "POST",
                "/",
                json!({
                    "title": "",
                    "description": "Talk",
                    "date": "2024-01-01",
                    "location": "Hall A"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_event_coerces_non_sequence_tags() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().returning(|event| Ok(event));

        let app = app(mock_repo);
        let response = app
            .oneshot(json_request(
                "POST",
                "/",
                json!({
                    "title": "Meetup",
                    "description": "Talk",
                    "date": "2024-01-01",
                    "location": "Hall A",
                    "tags": {"not": "a-sequence"}
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let event: Event = json_body(response.into_body()).await;
        assert!(event.tags.is_empty());
    }

    #[tokio::test]
    async fn test_list_events_returns_200_with_array() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_list()
            .returning(|_| Ok(vec![sample_event(), sample_event()]));

        let app = app(mock_repo);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/?tag=rust")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let events: Vec<Event> = json_body(response.into_body()).await;
        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn test_list_events_store_failure_returns_500() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_list()
            .returning(|_| Err(EventError::Database("connection reset".to_string())));

        let app = app(mock_repo);
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // The underlying failure must not leak to the caller
        let body: serde_json::Value = json_body(response.into_body()).await;
        assert!(!body["message"].as_str().unwrap().contains("connection"));
    }

    #[tokio::test]
    async fn test_get_event_returns_200() {
        let event = sample_event();
        let event_id = event.id;

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(event.clone())));

        let app = app(mock_repo);
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", event_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let found: Event = json_body(response.into_body()).await;
        assert_eq!(found.id, event_id);
    }

    #[tokio::test]
    async fn test_get_event_unknown_id_returns_404() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let app = app(mock_repo);
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_event_malformed_id_returns_404() {
        let app = app(MockEventRepository::new());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/not-a-valid-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rsvp_returns_200_with_attendee() {
        let event = sample_event();
        let event_id = event.id;

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(event.clone())));
        mock_repo.expect_update().times(1).returning(|_| Ok(()));

        let app = app(mock_repo);
        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/{}/rsvp", event_id),
                json!({"attendee": "a@x.com"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let updated: Event = json_body(response.into_body()).await;
        assert_eq!(updated.attendees, vec!["a@x.com"]);
    }

    #[tokio::test]
    async fn test_rsvp_twice_keeps_single_attendee() {
        let mut event = sample_event();
        event.add_attendee("a@x.com");
        let event_id = event.id;

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(event.clone())));
        mock_repo.expect_update().times(0);

        let app = app(mock_repo);
        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/{}/rsvp", event_id),
                json!({"attendee": "a@x.com"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let updated: Event = json_body(response.into_body()).await;
        assert_eq!(updated.attendees.len(), 1);
    }

    #[tokio::test]
    async fn test_rsvp_missing_attendee_returns_400() {
        let app = app(MockEventRepository::new());

        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/{}/rsvp", Uuid::now_v7()),
                json!({}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rsvp_unknown_event_returns_404() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let app = app(mock_repo);
        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/{}/rsvp", Uuid::now_v7()),
                json!({"attendee": "a@x.com"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_event_returns_confirmation() {
        let event = sample_event();
        let event_id = event.id;

        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_delete()
            .returning(move |_| Ok(Some(event.clone())));

        let app = app(mock_repo);
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/{}", event_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: MessageResponse = json_body(response.into_body()).await;
        assert_eq!(body.message, "Event deleted successfully");
    }

    #[tokio::test]
    async fn test_delete_unknown_event_returns_404() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(None));

        let app = app(mock_repo);
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
