//! Per-IP rate limiting.
//!
//! The client IP is taken from `X-Forwarded-For`/`X-Real-IP` when present
//! (the service runs behind a proxy), falling back to the peer address, so the
//! server must be started with `into_make_service_with_connect_info`.

/// General endpoints: one request back every 100 ms (10 per second), burst of 20.
pub const GENERAL_REPLENISH_MS: u64 = 100;
pub const GENERAL_BURST: u32 = 20;

/// Review submissions: one request back every 200 ms (5 per second), burst of 10.
pub const REVIEW_REPLENISH_MS: u64 = 200;
pub const REVIEW_BURST: u32 = 10;

/// Build a `GovernorLayer` keyed by client IP.
///
/// A macro rather than a function so the layer's generic parameters are
/// inferred at the call site.
#[macro_export]
macro_rules! make_rate_limit_layer {
    ($replenish_ms:expr, $burst:expr) => {{
        let config = ::tower_governor::governor::GovernorConfigBuilder::default()
            .per_millisecond($replenish_ms)
            .burst_size($burst)
            .key_extractor(::tower_governor::key_extractor::SmartIpKeyExtractor)
            .use_headers()
            .finish()
            .expect("rate limit period and burst must be non-zero");
        ::tower_governor::GovernorLayer::new(config)
    }};
}
