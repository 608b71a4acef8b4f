use crate::constants::{DEFAULT_API_BASE, DEFAULT_PAGE_SIZE};
use crate::storage::config::StorageConfig;
use crate::utils::config::{get_env_or_default, get_env_or_none};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq, Eq)]
/// Main configuration for the contacts API client
pub struct Config {
    /// REST API configuration
    pub rest_api: RestApiConfig,
    /// Persisted state configuration
    pub storage: StorageConfig,
    /// Rate limiter configuration for API requests
    pub rate_limiter: RateLimiterConfig,
    /// Number of contacts to retrieve per page
    pub page_size: u32,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq, Eq)]
/// Configuration for the REST API
pub struct RestApiConfig {
    /// Base URL used until one is persisted through the session
    pub base_url: String,
    /// Request timeout in seconds; `None` leaves requests unbounded
    pub timeout: Option<u64>,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq, Eq)]
/// Configuration for client-side rate limiting of API requests
pub struct RateLimiterConfig {
    /// Maximum number of requests allowed per period; 0 disables rate limiting
    pub max_requests: u32,
    /// Time period in seconds for the rate limit
    pub period_seconds: u64,
    /// Burst size - maximum number of requests that can be made at once
    pub burst_size: u32,
}

impl RateLimiterConfig {
    /// Whether requests should be throttled at all
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.max_requests > 0 && self.period_seconds > 0
    }
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: 0,
            period_seconds: 60,
            burst_size: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration from the environment
    ///
    /// Loads a `.env` file when present, then reads:
    /// - `CONTACTS_API_BASE` (default `http://localhost:8000`)
    /// - `CONTACTS_HTTP_TIMEOUT_SECS` (optional)
    /// - `CONTACTS_STORAGE_PATH` (optional, memory storage when unset)
    /// - `CONTACTS_PAGE_SIZE` (default 10)
    /// - `CONTACTS_RATE_LIMIT_MAX_REQUESTS`, `CONTACTS_RATE_LIMIT_PERIOD_SECONDS`,
    ///   `CONTACTS_RATE_LIMIT_BURST_SIZE` (disabled by default)
    ///
    /// # Returns
    ///
    /// A new `Config` instance
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let defaults = RateLimiterConfig::default();
        let page_size = get_env_or_default("CONTACTS_PAGE_SIZE", DEFAULT_PAGE_SIZE);

        Config {
            rest_api: RestApiConfig {
                base_url: get_env_or_default("CONTACTS_API_BASE", String::from(DEFAULT_API_BASE)),
                timeout: get_env_or_none("CONTACTS_HTTP_TIMEOUT_SECS"),
            },
            storage: StorageConfig {
                path: get_env_or_none::<PathBuf>("CONTACTS_STORAGE_PATH"),
            },
            rate_limiter: RateLimiterConfig {
                max_requests: get_env_or_default(
                    "CONTACTS_RATE_LIMIT_MAX_REQUESTS",
                    defaults.max_requests,
                ),
                period_seconds: get_env_or_default(
                    "CONTACTS_RATE_LIMIT_PERIOD_SECONDS",
                    defaults.period_seconds,
                ),
                burst_size: get_env_or_default(
                    "CONTACTS_RATE_LIMIT_BURST_SIZE",
                    defaults.burst_size,
                ),
            },
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
        }
    }

    /// Creates a configuration pointing at `base_url` with in-memory storage
    /// and no rate limiting, ignoring the environment
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Config {
            rest_api: RestApiConfig {
                base_url: base_url.into(),
                timeout: None,
            },
            storage: StorageConfig::default(),
            rate_limiter: RateLimiterConfig::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
