//! Key-value store contract backing link records.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Errors raised by a [`KeyValueStore`] implementation.
///
/// The service layer does not distinguish between variants: every one of them
/// surfaces as `LinkError::StoreUnavailable`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store operation failed: {0}")]
    Operation(String),

    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("store connection is closed")]
    Closed,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Thin contract over an external hash-capable key-value store.
///
/// All keys live in a single logical namespace. Each key holds a map of string
/// fields, and individual operations are atomic per key from the caller's point
/// of view. No operation spans more than one key.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis (`HSET`/`HGETALL`/`HINCRBY`/`EXPIRE`)
/// - [`crate::infrastructure::store::MemoryStore`] - In-process store for development and tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `true` if the key currently holds a value.
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Creates or overwrites every named field of `key` in one call.
    async fn write_fields(&self, key: &str, fields: HashMap<String, String>) -> StoreResult<()>;

    /// Reads all fields of `key`.
    ///
    /// A missing (or already evicted) key yields an empty map, never an error.
    async fn read_all_fields(&self, key: &str) -> StoreResult<HashMap<String, String>>;

    /// Adds `delta` to an integer field and returns the new value.
    ///
    /// A missing key or field starts from zero.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Operation`] if the current field value is not an integer.
    async fn increment_field(&self, key: &str, field: &str, delta: i64) -> StoreResult<i64>;

    /// Schedules automatic eviction of `key` after `seconds`.
    ///
    /// Has no effect when the key does not exist.
    async fn set_expiry(&self, key: &str, seconds: u64) -> StoreResult<()>;

    /// Checks whether the store answers requests.
    async fn health_check(&self) -> bool;

    /// Ends the adapter's lifecycle. Later calls fail with [`StoreError::Closed`].
    async fn close(&self);
}
