//! Infrastructure layer for external integrations.
//!
//! This layer implements the storage contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`store`] - Redis and in-memory key-value store adapters

pub mod store;
