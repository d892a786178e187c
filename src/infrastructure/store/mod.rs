//! Key-value store adapters.
//!
//! Two implementations of [`crate::domain::repositories::KeyValueStore`]:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`MemoryStore`] - In-process store for local development and tests

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
