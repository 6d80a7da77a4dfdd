//! Event domain error types

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Result type for event operations
pub type EventResult<T> = Result<T, EventError>;

/// Event domain errors
#[derive(Debug, Error)]
pub enum EventError {
    /// No event matches the given id (also covers malformed ids)
    #[error("Event not found: {0}")]
    NotFound(String),

    /// Missing or empty required input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// MongoDB error
    #[error("Database error: {0}")]
    Database(String),
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        EventError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        EventError::Database(format!("BSON serialization error: {}", err))
    }
}

/// Convert EventError to AppError for standardized error responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(_) => AppError::NotFound("Event not found".to_string()),
            EventError::Validation(msg) => AppError::BadRequest(msg),
            EventError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_is_404() {
        let response = EventError::NotFound("abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_is_400() {
        let response =
            EventError::Validation("Attendee name or email is required".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_is_500() {
        let response = EventError::Database("server selection timed out".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
