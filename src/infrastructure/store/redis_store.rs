//! Redis-backed key-value store.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::repositories::{KeyValueStore, StoreError, StoreResult};

impl From<RedisError> for StoreError {
    fn from(e: RedisError) -> Self {
        if e.is_connection_refusal() || e.is_io_error() {
            StoreError::Connection(e.to_string())
        } else {
            StoreError::Operation(e.to_string())
        }
    }
}

/// Redis implementation of [`KeyValueStore`].
///
/// Uses a `ConnectionManager`, which multiplexes commands over one connection
/// and reconnects transparently. Every command is bounded by `timeout`.
pub struct RedisStore {
    client: ConnectionManager,
    timeout: Duration,
    closed: AtomicBool,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `timeout` - Upper bound for every store call, including this PING
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails. Returns [`StoreError::Timeout`] if Redis
    /// does not answer within `timeout`.
    pub async fn connect(redis_url: &str, timeout: Duration) -> StoreResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = tokio::time::timeout(timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Timeout(timeout))?
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let store = Self {
            client: manager,
            timeout,
            closed: AtomicBool::new(false),
        };

        let mut conn = store.client.clone();
        store
            .bounded(async move { conn.ping::<()>().await })
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");
        Ok(store)
    }

    /// Runs a command with the configured timeout, mapping errors to [`StoreError`].
    async fn bounded<T, F>(&self, command: F) -> StoreResult<T>
    where
        F: Future<Output = Result<T, RedisError>>,
    {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }

        match tokio::time::timeout(self.timeout, command).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.client.clone();
        self.bounded(async move { conn.exists(key).await }).await
    }

    async fn write_fields(&self, key: &str, fields: HashMap<String, String>) -> StoreResult<()> {
        let items: Vec<(String, String)> = fields.into_iter().collect();
        let mut conn = self.client.clone();

        self.bounded(async move { conn.hset_multiple::<_, _, _, ()>(key, &items).await })
            .await?;

        debug!("Store HSET {}", key);
        Ok(())
    }

    async fn read_all_fields(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        let mut conn = self.client.clone();
        self.bounded(async move { conn.hgetall(key).await }).await
    }

    async fn increment_field(&self, key: &str, field: &str, delta: i64) -> StoreResult<i64> {
        let mut conn = self.client.clone();
        self.bounded(async move { conn.hincr(key, field, delta).await })
            .await
    }

    async fn set_expiry(&self, key: &str, seconds: u64) -> StoreResult<()> {
        let seconds = i64::try_from(seconds)
            .map_err(|_| StoreError::Operation(format!("TTL out of range: {}", seconds)))?;
        let mut conn = self.client.clone();

        self.bounded(async move { conn.expire::<_, ()>(key, seconds).await })
            .await?;

        debug!("Store EXPIRE {} {}s", key, seconds);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        self.bounded(async move { conn.ping::<()>().await })
            .await
            .is_ok()
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!("Redis store closed");
        }
    }
}
