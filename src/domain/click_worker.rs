//! Background worker that applies click increments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::link::FIELD_CLICK_COUNT;
use crate::domain::repositories::KeyValueStore;

/// Retries after the first failed increment.
const MAX_RETRIES: usize = 2;

/// Consumes click events until every sender is dropped.
///
/// Up to `concurrency` increments run at once. A failed increment is retried
/// with jittered exponential backoff; the final failure is only logged, it is
/// never reported back to the redirect that produced the event.
///
/// Returns after the channel is closed and all in-flight increments finished.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    store: Arc<dyn KeyValueStore>,
    concurrency: usize,
) {
    let concurrency = concurrency.max(1);
    let permits = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let store = store.clone();

        tokio::spawn(async move {
            let _permit = permit;
            record_click(store.as_ref(), &event).await;
        });
    }

    // All permits back means no increment is still running.
    let _ = permits.acquire_many(concurrency as u32).await;
    info!("Click worker stopped");
}

/// Increments the click counter of one link, with retries.
async fn record_click(store: &dyn KeyValueStore, event: &ClickEvent) {
    let key = event.key();
    let key = key.as_str();

    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_millis(500))
        .map(jitter)
        .take(MAX_RETRIES);

    match Retry::start(strategy, move || store.increment_field(key, FIELD_CLICK_COUNT, 1)).await {
        Ok(count) => debug!("Click recorded for {} (total {})", event.short_code, count),
        Err(e) => {
            metrics::counter!("click_increment_failures_total").increment(1);
            warn!("Failed to record click for {}: {}", event.short_code, e);
        }
    }
}
