/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Persisted session state
//!
//! The [`Session`] owns everything that must survive a restart: the API base
//! URL, the credential pair and the username of the logged in user. It is
//! passed explicitly to the HTTP client and the controllers, and every read
//! goes to the backing [`Storage`].

use crate::application::config::Config;
use crate::constants::{API_BASE_STORAGE_KEY, TOKEN_STORAGE_KEY, USERNAME_STORAGE_KEY};
use crate::error::AppError;
use crate::model::auth::{CredentialPair, User};
use crate::storage::Storage;
use crate::storage::utils::{create_storage, load_json, store_json};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Normalizes a user supplied API base URL
///
/// Surrounding whitespace and a single trailing slash are removed. Returns
/// `None` for a blank URL.
#[must_use]
pub fn normalize_api_base(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.strip_suffix('/').unwrap_or(trimmed).to_string())
}

/// Session and configuration state shared by the client and controllers
pub struct Session {
    storage: Arc<dyn Storage>,
    default_api_base: String,
}

impl Session {
    /// Creates a session over `storage`
    ///
    /// # Arguments
    /// * `storage` - Backend holding the persisted keys
    /// * `default_api_base` - Base URL used until one is persisted
    pub fn new(storage: Arc<dyn Storage>, default_api_base: impl AsRef<str>) -> Self {
        let default_api_base = normalize_api_base(default_api_base.as_ref())
            .unwrap_or_else(|| crate::constants::DEFAULT_API_BASE.to_string());
        Self {
            storage,
            default_api_base,
        }
    }

    /// Creates a session from configuration, opening the configured storage
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let storage = create_storage(&config.storage)?;
        Ok(Self::new(storage, &config.rest_api.base_url))
    }

    /// The backing storage
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Current API base URL: the persisted one, else the configured default
    #[must_use]
    pub fn api_base(&self) -> String {
        match self.storage.get(API_BASE_STORAGE_KEY) {
            Ok(Some(url)) => url,
            Ok(None) => self.default_api_base.clone(),
            Err(e) => {
                warn!("Cannot read API base, using default: {}", e);
                self.default_api_base.clone()
            }
        }
    }

    /// Sets and persists the API base URL
    ///
    /// # Returns
    /// * `Ok(String)` - The normalized URL now in use
    /// * `Err(AppError::InvalidInput)` - If the URL is blank
    /// * `Err(AppError)` - If it cannot be persisted
    pub fn set_api_base(&self, url: &str) -> Result<String, AppError> {
        let url = normalize_api_base(url)
            .ok_or_else(|| AppError::InvalidInput("API base URL cannot be empty".to_string()))?;
        self.storage.set(API_BASE_STORAGE_KEY, &url)?;
        info!("API base URL set to: {}", url);
        Ok(url)
    }

    /// The stored credential pair, if a well-formed one exists
    #[must_use]
    pub fn tokens(&self) -> Option<CredentialPair> {
        match load_json::<CredentialPair>(self.storage.as_ref(), TOKEN_STORAGE_KEY) {
            Ok(tokens) => tokens.filter(CredentialPair::is_well_formed),
            Err(e) => {
                warn!("Cannot read stored tokens: {}", e);
                None
            }
        }
    }

    /// The stored access token
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.tokens().map(|t| t.access)
    }

    /// Persists `tokens`, or removes the stored pair when `None`
    pub fn set_tokens(&self, tokens: Option<&CredentialPair>) -> Result<(), AppError> {
        match tokens {
            Some(pair) => store_json(self.storage.as_ref(), TOKEN_STORAGE_KEY, pair),
            None => self.storage.remove(TOKEN_STORAGE_KEY),
        }
    }

    /// Removes the stored credential pair; failures are logged
    pub fn clear_tokens(&self) {
        match self.set_tokens(None) {
            Ok(()) => debug!("Stored tokens cleared"),
            Err(e) => warn!("Failed to clear stored tokens: {}", e),
        }
    }

    /// The stored username
    #[must_use]
    pub fn username(&self) -> Option<String> {
        match self.storage.get(USERNAME_STORAGE_KEY) {
            Ok(name) => name.filter(|n| !n.is_empty()),
            Err(e) => {
                warn!("Cannot read stored username: {}", e);
                None
            }
        }
    }

    /// Persists `username`, or removes it when `None`
    pub fn set_username(&self, username: Option<&str>) -> Result<(), AppError> {
        match username {
            Some(name) if !name.is_empty() => self.storage.set(USERNAME_STORAGE_KEY, name),
            _ => self.storage.remove(USERNAME_STORAGE_KEY),
        }
    }

    /// Whether a credential pair is stored
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens().is_some()
    }

    /// The logged in user: the stored username, only while tokens are stored
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        if !self.is_authenticated() {
            return None;
        }
        self.username().map(User::new)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("api_base", &self.api_base())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
