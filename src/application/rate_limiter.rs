/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Rate limiter module for controlling API request rates
//!
//! Client-side throttling built on the `governor` crate. It is off unless
//! `CONTACTS_RATE_LIMIT_MAX_REQUESTS` is set, and it only delays requests:
//! nothing is retried or rejected.

use crate::application::config::RateLimiterConfig;
use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::QuantaClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Rate limiter for controlling API request rates
///
/// Token bucket holding `burst_size` cells, replenished at
/// `max_requests / period_seconds`.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<GovernorRateLimiter<NotKeyed, InMemoryState, QuantaClock>>,
}

impl RateLimiter {
    /// Creates a rate limiter from configuration, or `None` when the
    /// configuration disables rate limiting
    ///
    /// # Example
    ///
    /// ```
    /// use contacts_client::application::config::RateLimiterConfig;
    /// use contacts_client::application::rate_limiter::RateLimiter;
    ///
    /// let config = RateLimiterConfig {
    ///     max_requests: 60,
    ///     period_seconds: 60,
    ///     burst_size: 10,
    /// };
    ///
    /// assert!(RateLimiter::new(&config).is_some());
    /// ```
    #[must_use]
    pub fn new(config: &RateLimiterConfig) -> Option<Self> {
        let max_requests = NonZeroU32::new(config.max_requests)?;
        if config.period_seconds == 0 {
            return None;
        }

        let replenish = Duration::from_secs(config.period_seconds) / max_requests.get();
        let burst_size = NonZeroU32::new(config.burst_size).unwrap_or(max_requests);
        let quota = Quota::with_period(replenish)
            .unwrap_or_else(|| Quota::per_second(max_requests))
            .allow_burst(burst_size);

        debug!(
            "Rate limiting to {} requests per {}s (burst {})",
            max_requests, config.period_seconds, burst_size
        );

        Some(Self {
            limiter: Arc::new(GovernorRateLimiter::direct(quota)),
        })
    }

    /// Waits until a request can be made according to the rate limit
    pub async fn wait(&self) {
        while self.limiter.check().is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Checks if a request can be made immediately, consuming a cell if so
    #[must_use]
    pub fn check(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limiter", &"GovernorRateLimiter")
            .finish()
    }
}
