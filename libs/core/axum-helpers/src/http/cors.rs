//! CORS layer construction.

use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
];

fn allowed_headers() -> [HeaderName; 3] {
    [
        axum::http::header::CONTENT_TYPE,
        axum::http::header::AUTHORIZATION,
        axum::http::header::ACCEPT,
    ]
}

/// CORS layer restricted to an explicit list of origins, with credentials.
///
/// # Example
/// ```ignore
/// let origins = vec!["http://localhost:5173".parse().unwrap()];
/// let app = Router::new().layer(create_cors_layer(origins));
/// ```
pub fn create_cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(allowed_headers())
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Permissive CORS layer: any origin, no credentials.
///
/// tower-http rejects the wildcard-origin + credentials combination, so the
/// permissive variant never allows credentials.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}
