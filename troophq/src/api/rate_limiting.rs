//! Request-rate limiting for API endpoints
//!
//! Two tiers: the public login endpoint is limited by client IP, the
//! authenticated endpoints by session token. This limits request volume
//! only; counting failed credentials is the login attempt guard's job.

use axum::http::Request;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::{KeyExtractor, SmartIpKeyExtractor};
use tower_governor::{GovernorError, GovernorLayer};

use troophq_core::settings::rate_limiting::TierConfig;

/// Extract the rate limit key from the session token in the Authorization
/// header, so authenticated endpoints are limited per user rather than per
/// IP address
#[derive(Clone, Copy, Debug)]
pub struct SessionTokenExtractor;

impl KeyExtractor for SessionTokenExtractor {
    type Key = String;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        req.headers()
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|token| {
                // first 32 chars are unique enough, avoids storing full tokens
                token.chars().take(32).collect()
            })
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

/// Create the rate limiter for the public login endpoint, keyed by IP
pub fn create_login_limiter(
    config: &TierConfig,
) -> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, axum::body::Body> {
    // at least 1 per minute, avoids division by zero
    let per_second = std::cmp::max(1, config.requests_per_minute / 60);

    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(config.burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("Invalid rate limit config"),
    );

    GovernorLayer::new(governor_config)
}

/// Create the rate limiter for authenticated API endpoints, keyed by token
pub fn create_authenticated_limiter(
    config: &TierConfig,
) -> GovernorLayer<SessionTokenExtractor, NoOpMiddleware, axum::body::Body> {
    let per_second = std::cmp::max(1, config.requests_per_minute / 60);

    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(config.burst_size)
            .key_extractor(SessionTokenExtractor)
            .finish()
            .expect("Invalid rate limit config"),
    );

    GovernorLayer::new(governor_config)
}
