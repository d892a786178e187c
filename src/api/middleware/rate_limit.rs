//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Creates the per-IP limiter for link creation.
///
/// # Limits
///
/// - **Burst**: 100 requests
/// - **Refill**: one request every 9 seconds (about 100 per 15 minutes)
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Keys on the socket peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn creation_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(9)
            .burst_size(100)
            .finish()
            .expect("rate limit period and burst size are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
