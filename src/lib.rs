/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # contacts-client
//!
//! A session-aware client for a contact management REST API.
//!
//! The crate authenticates against a token-issuing backend (`/token/`),
//! keeps the access/refresh credential pair in a pluggable key-value
//! [`storage::Storage`], and transparently refreshes an expired access token
//! once per failing call. Concurrent callers that hit the same expired token
//! share a single refresh request.
//!
//! On top of the HTTP client sit two controllers that carry the state a
//! front-end needs:
//! - [`application::auth::AuthController`]: login, logout, current user
//! - [`application::contacts::ContactsController`]: paginated, searchable
//!   contact listing plus create, update and delete
//!
//! ## Example
//! ```ignore
//! use contacts_client::prelude::*;
//!
//! let config = Config::new();
//! let session = Arc::new(Session::from_config(&config)?);
//! let client = Arc::new(HttpClient::new(&config, session.clone())?);
//!
//! let auth = AuthController::new(AuthServiceImpl::new(client.clone()), session.clone());
//! auth.login("ann", "secret").await?;
//!
//! let contacts = ContactsController::new(ContactServiceImpl::new(client), session, &config);
//! contacts.fetch().await?;
//! ```

/// Application layer: configuration, session, controllers and services
pub mod application;
/// Library wide constants
pub mod constants;
/// Error types
pub mod error;
/// Wire models and the HTTP client
pub mod model;
/// Convenience re-exports
pub mod prelude;
/// Key-value persistence backends
pub mod storage;
/// Logging, environment and validation helpers
pub mod utils;

pub use application::config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
