//! Link creation and resolution service.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::LinkRecord;
use crate::domain::errors::LinkError;
use crate::domain::repositories::KeyValueStore;
use crate::utils::code_generator::{generate_code, is_valid_alias};
use crate::utils::url_validator::validate_long_url;

/// Attempts at drawing an unused random code before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Longest accepted `expires_in`: ten years.
pub const MAX_EXPIRES_IN_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

/// Service for creating and resolving short links.
///
/// Owns the explicitly constructed store handle and the sending side of the
/// click queue. Click counting never blocks or fails a resolution.
pub struct LinkService {
    store: Arc<dyn KeyValueStore>,
    click_sender: mpsc::Sender<ClickEvent>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the externally visible origin used to build short URLs;
    /// a trailing slash is ignored.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        click_sender: mpsc::Sender<ClickEvent>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            store,
            click_sender,
            base_url,
        }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `long_url` - Absolute HTTP(S) URL to redirect to, stored as given
    /// - `alias` - Optional caller-chosen code; an empty alias counts as absent
    /// - `expires_in` - Optional lifetime in seconds, enforced by the store TTL;
    ///   `0` counts as absent and the link never expires
    ///
    /// # Code Selection
    ///
    /// - With an alias: the alias is used if it is free
    /// - Otherwise: up to 5 random 7-character codes are tried
    ///
    /// Checking and writing are separate store calls, so two concurrent requests
    /// for the same alias can both pass the check and the later write wins.
    /// Writing the fields and setting the TTL are separate calls as well; a crash
    /// in between leaves a link that never expires.
    ///
    /// # Errors
    ///
    /// - [`LinkError::InvalidInput`] for a bad URL, alias format or expiry, before
    ///   any store access
    /// - [`LinkError::AliasTaken`] if the alias already names a link
    /// - [`LinkError::GenerationExhausted`] if every random candidate collided
    /// - [`LinkError::StoreUnavailable`] if the store fails
    pub async fn create(
        &self,
        long_url: &str,
        alias: Option<&str>,
        expires_in: Option<u64>,
    ) -> Result<LinkRecord, LinkError> {
        let long_url = long_url.trim();
        validate_long_url(long_url).map_err(|e| LinkError::invalid_input(e.to_string()))?;

        let expires_in = expires_in.filter(|secs| *secs != 0);
        if let Some(secs) = expires_in
            && secs > MAX_EXPIRES_IN_SECONDS
        {
            return Err(LinkError::invalid_input(format!(
                "expiresIn must be at most {} seconds",
                MAX_EXPIRES_IN_SECONDS
            )));
        }

        let alias = alias.filter(|a| !a.is_empty());

        let short_code = if let Some(alias) = alias {
            if !is_valid_alias(alias) {
                return Err(LinkError::invalid_input(
                    "Alias must be 3-20 characters long and contain only letters, digits, '-' or '_'",
                ));
            }

            if self.store.exists(&LinkRecord::store_key(alias)).await? {
                return Err(LinkError::AliasTaken(alias.to_string()));
            }

            alias.to_string()
        } else {
            self.generate_unique_code().await?
        };

        let record = LinkRecord::new(short_code, long_url.to_string(), Utc::now(), expires_in);
        let key = record.key();

        self.store.write_fields(&key, record.to_fields()).await?;

        if let Some(secs) = expires_in
            && let Err(e) = self.store.set_expiry(&key, secs).await
        {
            warn!("Link {} was stored without its TTL: {}", record.short_code, e);
            return Err(e.into());
        }

        metrics::counter!("links_created_total").increment(1);
        info!(
            "Created link {} -> {} (expires in: {:?})",
            record.short_code, record.long_url, expires_in
        );

        Ok(record)
    }

    /// Resolves a short code to its target URL and counts the click.
    ///
    /// The click is queued for the background worker and never awaited. A full
    /// or closed queue only costs the count, not the redirect.
    ///
    /// Expiry is enforced by the store TTL alone: a key the store has not
    /// evicted yet still resolves.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no record (or no `longUrl`) exists.
    /// Returns [`LinkError::StoreUnavailable`] if the lookup fails.
    pub async fn resolve(&self, short_code: &str) -> Result<String, LinkError> {
        let record = self.get_link(short_code).await?;

        self.dispatch_click(short_code);
        metrics::counter!("redirects_total").increment(1);

        Ok(record.long_url)
    }

    /// Reads a link record without counting a click.
    ///
    /// Codes that cannot have been issued (wrong length or characters) are
    /// reported as missing without a store round trip.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn get_link(&self, short_code: &str) -> Result<LinkRecord, LinkError> {
        if !is_valid_alias(short_code) {
            debug!("Rejected malformed short code without lookup");
            return Err(LinkError::NotFound);
        }

        let fields = self
            .store
            .read_all_fields(&LinkRecord::store_key(short_code))
            .await?;

        LinkRecord::from_fields(short_code, &fields).ok_or(LinkError::NotFound)
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url, short_code)
    }

    /// Draws random codes until one is unused, up to [`MAX_GENERATION_ATTEMPTS`].
    async fn generate_unique_code(&self) -> Result<String, LinkError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = generate_code();

            if !self.store.exists(&LinkRecord::store_key(&code)).await? {
                return Ok(code);
            }

            warn!("Short code collision on attempt {}", attempt);
        }

        Err(LinkError::GenerationExhausted(MAX_GENERATION_ATTEMPTS))
    }

    /// Queues a click increment without waiting for it.
    fn dispatch_click(&self, short_code: &str) {
        match self.click_sender.try_send(ClickEvent::new(short_code)) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                warn!("Click queue full, dropping click for {}", event.short_code);
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                error!("Click queue closed, dropping click for {}", event.short_code);
            }
        }
    }
}
