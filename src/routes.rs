//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`             - Short link redirect (301)
//! - `POST /api/shorten`        - Link creation (CORS-restricted, rate limited)
//! - `GET  /api/stats/{code}`   - Link metadata and click count
//! - `GET  /api/health`         - Store and click queue health
//! - anything else              - 404 JSON
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Single allowed origin on the creation endpoint
//! - **Rate limiting** - Per-IP token bucket on the creation endpoint
//! - **Body limit** - 10 KiB on the creation endpoint

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::{Router, routing::get};

use crate::api;
use crate::api::handlers::{not_found_handler, redirect_handler};
use crate::api::middleware::{cors, rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;

/// Largest accepted request body on the creation endpoint.
pub const MAX_BODY_BYTES: usize = 10 * 1024;

/// Deployment-dependent router settings.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Origin allowed by CORS on `POST /api/shorten`.
    pub allowed_origin: HeaderValue,
    /// Enables the per-IP creation limit. Requires connect info on the server.
    pub rate_limit: bool,
}

impl RouterOptions {
    /// Builds options from the service configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured origin is not a valid header value.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            allowed_origin: config.allowed_origin_header()?,
            rate_limit: config.rate_limit_enabled,
        })
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            allowed_origin: HeaderValue::from_static("http://localhost:5173"),
            rate_limit: false,
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// The redirect route is a single path segment, so it never shadows `/api/*`.
pub fn app_router(state: AppState, options: RouterOptions) -> Router {
    let mut creation = api::routes::creation_routes();
    if options.rate_limit {
        creation = creation.layer(rate_limit::creation_layer());
    }
    let creation = creation
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors::layer(options.allowed_origin));

    let api_router = Router::new()
        .merge(creation)
        .merge(api::routes::public_routes());

    Router::new()
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_router)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}
