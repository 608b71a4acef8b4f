/// Authentication controller
pub mod auth;
/// Application configuration module
pub mod config;
/// Contacts controller with pagination and search state
pub mod contacts;
/// Service interfaces
pub mod interfaces;
/// Rate limiter module for API request throttling
pub mod rate_limiter;
/// Service implementations over the HTTP client
pub mod services;
/// Persisted session state
pub mod session;
