//! CORS policy for the creation endpoint.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// Allows browser calls to `POST /api/shorten` from a single origin.
pub fn layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
