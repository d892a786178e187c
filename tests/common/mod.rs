#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tower::Layer;

use kv_shortener::domain::click_worker::run_click_worker;
use kv_shortener::domain::entities::LinkRecord;
use kv_shortener::domain::repositories::KeyValueStore;
use kv_shortener::infrastructure::store::MemoryStore;
use kv_shortener::routes::{RouterOptions, app_router};
use kv_shortener::state::AppState;

pub const BASE_URL: &str = "http://sho.rt";

/// State backed by a fresh in-memory store with a running click worker.
pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let (tx, rx) = mpsc::channel(100);

    let dyn_store: Arc<dyn KeyValueStore> = store.clone();
    tokio::spawn(run_click_worker(rx, dyn_store.clone(), 2));

    (AppState::new(dyn_store, tx, BASE_URL), store)
}

/// Full router without rate limiting.
pub fn create_test_server() -> (TestServer, Arc<MemoryStore>) {
    let (state, store) = create_test_state();
    let app = app_router(state, RouterOptions::default());

    (TestServer::new(app).unwrap(), store)
}

/// Writes a link straight into the store, bypassing the API.
pub async fn create_test_link(store: &MemoryStore, code: &str, url: &str) {
    let record = LinkRecord::new(code.to_string(), url.to_string(), chrono::Utc::now(), None);
    store.write_fields(&record.key(), record.to_fields()).await.unwrap();
}

pub async fn read_link_fields(store: &MemoryStore, code: &str) -> HashMap<String, String> {
    store
        .read_all_fields(&LinkRecord::store_key(code))
        .await
        .unwrap()
}

/// Polls the click counter until it reaches `expected` or a second passes.
pub async fn wait_for_clicks(store: &MemoryStore, code: &str, expected: u64) -> u64 {
    let mut count = 0;
    for _ in 0..100 {
        let fields = read_link_fields(store, code).await;
        count = fields
            .get("clickCount")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        if count >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    count
}

/// Inserts a fixed peer address, standing in for
/// `into_make_service_with_connect_info` in tests.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
