//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating store calls,
//! validation, and business rules. Services consume the store trait and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution

pub mod services;
