use contacts_client::config::{Config, RateLimiterConfig};
use contacts_client::constants::DEFAULT_PAGE_SIZE;

#[test]
fn test_config_with_base_url() {
    let config = Config::with_base_url("http://api.test");

    assert_eq!(config.rest_api.base_url, "http://api.test");
    assert_eq!(config.rest_api.timeout, None);
    assert_eq!(config.storage.path, None);
    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    assert!(!config.rate_limiter.is_enabled());
}

#[test]
fn test_rate_limiter_config_enabled() {
    let config = RateLimiterConfig {
        max_requests: 10,
        period_seconds: 60,
        burst_size: 5,
    };
    assert!(config.is_enabled());
    assert!(
        !RateLimiterConfig {
            period_seconds: 0,
            ..config
        }
        .is_enabled()
    );
}

#[test]
fn test_config_display() {
    let config = Config::with_base_url("http://api.test");
    let display = format!("{config}");
    assert!(display.contains("http://api.test"));
}

#[test]
fn test_config_serde_roundtrip_keeps_storage_path() {
    let mut config = Config::with_base_url("http://api.test");
    config.storage.path = Some("/tmp/contacts.json".into());

    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
