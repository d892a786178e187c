//! Shared application state for HTTP handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::LinkService;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::KeyValueStore;

/// State injected into every handler.
///
/// Holds the explicitly constructed store handle; there is no global
/// connection. Cloning is cheap (reference-counted fields).
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub store: Arc<dyn KeyValueStore>,
    pub click_sender: mpsc::Sender<ClickEvent>,
}

impl AppState {
    /// Wires the link service around a store and the click queue.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        click_sender: mpsc::Sender<ClickEvent>,
        base_url: impl Into<String>,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            store.clone(),
            click_sender.clone(),
            base_url,
        ));

        Self {
            link_service,
            store,
            click_sender,
        }
    }
}
