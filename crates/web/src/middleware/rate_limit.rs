//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Only the credential-accepting endpoints (`POST /login`, `POST /register`)
//! are limited: ~10 requests per minute per client IP.
//!
//! Clients are keyed by `SmartIpKeyExtractor`, which trusts `X-Forwarded-For`,
//! `X-Real-IP` and `Forwarded` before falling back to the peer address.

use std::sync::Arc;

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create the rate limiter for login and registration.
///
/// Replenishes one request every 6 seconds with a burst of 5. Returns `None`
/// only if the governor configuration is rejected.
#[must_use]
pub fn auth_rate_limiter() -> Option<RateLimiterLayer> {
    let config = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(6)
        .burst_size(5)
        .finish()?;
    Some(GovernorLayer::new(Arc::new(config)))
}
