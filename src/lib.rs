//! # KV Shortener
//!
//! A URL shortening service built with Axum on top of a key-value store (Redis).
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Link record, store trait, click worker
//! - **Application Layer** ([`application`]) - Link creation and resolution rules
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random 7-character codes or caller-chosen aliases
//! - Optional expiry enforced by the store TTL
//! - Asynchronous click counting with retry logic
//! - Per-IP rate limiting on link creation
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::LinkRecord;
    pub use crate::domain::repositories::KeyValueStore;
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{MemoryStore, RedisStore};
    pub use crate::routes::{RouterOptions, app_router};
    pub use crate::state::AppState;
}
