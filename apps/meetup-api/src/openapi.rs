//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meetup API",
        version = "0.1.0",
        description = "REST API for managing community events, backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    nest(
        (path = "/events", api = domain_events::ApiDoc)
    ),
    tags(
        (name = "events", description = "Community event management endpoints")
    )
)]
pub struct ApiDoc;
