//! API route configuration.

use crate::api::handlers::{health_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link creation route. CORS and rate limiting are layered on by
/// [`crate::routes::app_router`].
///
/// - `POST /shorten` - Create a short link
pub fn creation_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_handler))
}

/// Read-only API routes.
///
/// - `GET /stats/{code}` - Link metadata and click count
/// - `GET /health`       - Store and click queue health
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/stats/{code}", get(stats_handler))
        .route("/health", get(health_handler))
}
