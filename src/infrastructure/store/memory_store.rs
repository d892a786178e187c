//! In-process key-value store for development and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::repositories::{KeyValueStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Entry {
    fields: HashMap<String, String>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// [`KeyValueStore`] kept in process memory.
///
/// Mirrors the Redis semantics the service relies on: expired keys vanish on
/// the next access, increments create missing hashes, and non-integer fields
/// refuse to be incremented. Data does not survive a restart.
///
/// Expiry uses tokio's clock, so tests can drive it with a paused runtime.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using MemoryStore (data is not persisted)");
        Self::default()
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::Acquire) {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }
}

/// Drops `key` if its TTL has passed and returns the live entry, if any.
fn live_entry<'a>(entries: &'a mut HashMap<String, Entry>, key: &str) -> Option<&'a mut Entry> {
    let now = Instant::now();
    if entries.get(key).is_some_and(|e| e.is_expired(now)) {
        entries.remove(key);
        debug!("MemoryStore evicted {}", key);
    }
    entries.get_mut(key)
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        self.ensure_open()?;
        let mut entries = self.entries.lock().await;
        Ok(live_entry(&mut entries, key).is_some())
    }

    async fn write_fields(&self, key: &str, fields: HashMap<String, String>) -> StoreResult<()> {
        self.ensure_open()?;
        let mut entries = self.entries.lock().await;

        if live_entry(&mut entries, key).is_none() {
            entries.insert(key.to_string(), Entry::default());
        }
        if let Some(entry) = entries.get_mut(key) {
            entry.fields.extend(fields);
        }
        Ok(())
    }

    async fn read_all_fields(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        self.ensure_open()?;
        let mut entries = self.entries.lock().await;
        Ok(live_entry(&mut entries, key)
            .map(|entry| entry.fields.clone())
            .unwrap_or_default())
    }

    async fn increment_field(&self, key: &str, field: &str, delta: i64) -> StoreResult<i64> {
        self.ensure_open()?;
        let mut entries = self.entries.lock().await;

        if live_entry(&mut entries, key).is_none() {
            entries.insert(key.to_string(), Entry::default());
        }
        let Some(entry) = entries.get_mut(key) else {
            return Err(StoreError::Operation(format!("{} vanished during increment", key)));
        };

        let current = match entry.fields.get(field) {
            Some(value) => value.parse::<i64>().map_err(|_| {
                StoreError::Operation(format!("hash value {}.{} is not an integer", key, field))
            })?,
            None => 0,
        };
        let updated = current
            .checked_add(delta)
            .ok_or_else(|| StoreError::Operation("increment would overflow".to_string()))?;

        entry.fields.insert(field.to_string(), updated.to_string());
        Ok(updated)
    }

    async fn set_expiry(&self, key: &str, seconds: u64) -> StoreResult<()> {
        self.ensure_open()?;
        let mut entries = self.entries.lock().await;

        if let Some(entry) = live_entry(&mut entries, key) {
            entry.expires_at = Some(Instant::now() + Duration::from_secs(seconds));
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.closed.load(Ordering::Acquire)
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let store = MemoryStore::new();
        store
            .write_fields("url:a", fields(&[("longUrl", "https://example.com")]))
            .await
            .unwrap();

        assert!(store.exists("url:a").await.unwrap());
        let read = store.read_all_fields("url:a").await.unwrap();
        assert_eq!(read["longUrl"], "https://example.com");
    }

    #[tokio::test]
    async fn test_missing_key_reads_empty() {
        let store = MemoryStore::new();

        assert!(!store.exists("url:none").await.unwrap());
        assert!(store.read_all_fields("url:none").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_overwrites_named_fields_only() {
        let store = MemoryStore::new();
        store
            .write_fields("url:a", fields(&[("longUrl", "https://a.com"), ("clickCount", "5")]))
            .await
            .unwrap();
        store
            .write_fields("url:a", fields(&[("longUrl", "https://b.com")]))
            .await
            .unwrap();

        let read = store.read_all_fields("url:a").await.unwrap();
        assert_eq!(read["longUrl"], "https://b.com");
        assert_eq!(read["clickCount"], "5");
    }

    #[tokio::test]
    async fn test_increment_existing_and_missing() {
        let store = MemoryStore::new();
        store
            .write_fields("url:a", fields(&[("clickCount", "0")]))
            .await
            .unwrap();

        assert_eq!(store.increment_field("url:a", "clickCount", 1).await.unwrap(), 1);
        assert_eq!(store.increment_field("url:a", "clickCount", 2).await.unwrap(), 3);
        assert_eq!(store.increment_field("url:b", "clickCount", 1).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_increment_non_integer_fails() {
        let store = MemoryStore::new();
        store
            .write_fields("url:a", fields(&[("longUrl", "https://example.com")]))
            .await
            .unwrap();

        let result = store.increment_field("url:a", "longUrl", 1).await;
        assert!(matches!(result, Err(StoreError::Operation(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_evicts_key() {
        let store = MemoryStore::new();
        store
            .write_fields("url:a", fields(&[("longUrl", "https://example.com")]))
            .await
            .unwrap();
        store.set_expiry("url:a", 1).await.unwrap();

        tokio::time::advance(Duration::from_millis(900)).await;
        assert!(store.exists("url:a").await.unwrap());

        tokio::time::advance(Duration::from_millis(200)).await;
        assert!(!store.exists("url:a").await.unwrap());
        assert!(store.read_all_fields("url:a").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expiry_on_missing_key_is_noop() {
        let store = MemoryStore::new();
        store.set_expiry("url:none", 10).await.unwrap();

        assert!(!store.exists("url:none").await.unwrap());
    }

    #[tokio::test]
    async fn test_closed_store_rejects_calls() {
        let store = MemoryStore::new();
        assert!(store.health_check().await);

        store.close().await;

        assert!(!store.health_check().await);
        assert!(matches!(store.exists("url:a").await, Err(StoreError::Closed)));
    }
}
