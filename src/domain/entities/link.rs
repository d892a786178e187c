//! Link record entity and its store-level field encoding.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::collections::HashMap;
use tracing::warn;

/// Namespace prefix for every link key in the store.
pub const KEY_PREFIX: &str = "url:";

pub const FIELD_LONG_URL: &str = "longUrl";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_CLICK_COUNT: &str = "clickCount";
pub const FIELD_EXPIRES_AT: &str = "expiresAt";

/// A persisted short link.
///
/// Stored as a hash under `url:<short_code>` with string fields
/// `longUrl`, `createdAt` (ISO-8601), `clickCount` (decimal) and an optional
/// `expiresAt` (ISO-8601).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: u64,
    pub expires_at: Option<DateTime<Utc>>,
}

impl LinkRecord {
    /// Builds a fresh record with a zero click count.
    ///
    /// `expires_at` is derived from `expires_in_seconds` relative to `created_at`.
    pub fn new(
        short_code: String,
        long_url: String,
        created_at: DateTime<Utc>,
        expires_in_seconds: Option<u64>,
    ) -> Self {
        let expires_at = expires_in_seconds
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(Duration::try_seconds)
            .and_then(|ttl| created_at.checked_add_signed(ttl));

        Self {
            short_code,
            long_url,
            created_at,
            click_count: 0,
            expires_at,
        }
    }

    /// Store key for a short code.
    pub fn store_key(short_code: &str) -> String {
        format!("{}{}", KEY_PREFIX, short_code)
    }

    /// Store key for this record.
    pub fn key(&self) -> String {
        Self::store_key(&self.short_code)
    }

    /// Encodes the record as store fields.
    pub fn to_fields(&self) -> HashMap<String, String> {
        let mut fields = HashMap::with_capacity(4);
        fields.insert(FIELD_LONG_URL.to_string(), self.long_url.clone());
        fields.insert(FIELD_CREATED_AT.to_string(), format_timestamp(&self.created_at));
        fields.insert(FIELD_CLICK_COUNT.to_string(), self.click_count.to_string());
        if let Some(expires_at) = &self.expires_at {
            fields.insert(FIELD_EXPIRES_AT.to_string(), format_timestamp(expires_at));
        }
        fields
    }

    /// Decodes a record from store fields.
    ///
    /// Returns `None` when the hash is empty or has no `longUrl`, which is how a
    /// missing or evicted key looks. Unreadable metadata fields degrade to
    /// defaults instead of hiding the link.
    pub fn from_fields(short_code: &str, fields: &HashMap<String, String>) -> Option<Self> {
        let long_url = fields.get(FIELD_LONG_URL).filter(|url| !url.is_empty())?;

        let created_at = match fields.get(FIELD_CREATED_AT).map(|v| parse_timestamp(v)) {
            Some(Some(ts)) => ts,
            _ => {
                warn!("Link {} has a missing or malformed createdAt", short_code);
                DateTime::<Utc>::UNIX_EPOCH
            }
        };

        let click_count = fields
            .get(FIELD_CLICK_COUNT)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let expires_at = fields.get(FIELD_EXPIRES_AT).and_then(|v| parse_timestamp(v));

        Some(Self {
            short_code: short_code.to_string(),
            long_url: long_url.clone(),
            created_at,
            click_count,
            expires_at,
        })
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
