/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # Contacts Client Prelude
//!
//! This module provides a convenient way to import the most commonly used types and traits
//! of the library.
//!
//! ## Usage
//!
//! ```rust
//! use contacts_client::prelude::*;
//!
//! let config = Config::with_base_url("http://localhost:8000");
//! let session = Session::new(Arc::new(MemoryStorage::new()), &config.rest_api.base_url);
//! assert!(!session.is_authenticated());
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the contacts API client
pub use crate::config::{Config, RateLimiterConfig, RestApiConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::AppError;

// ============================================================================
// SESSION AND TRANSPORT
// ============================================================================

/// Persisted session state
pub use crate::application::session::Session;

/// HTTP client with automatic token refresh
pub use crate::model::http::{HttpClient, RequestOptions};

// ============================================================================
// SERVICES AND CONTROLLERS
// ============================================================================

/// Service traits
pub use crate::application::services::{AuthService, ContactService};

/// Service implementations
pub use crate::application::services::{AuthServiceImpl, ContactServiceImpl};

/// Controllers
pub use crate::application::auth::AuthController;
pub use crate::application::contacts::{ContactsController, ContactsState, FetchOutcome};

// ============================================================================
// MODELS
// ============================================================================

/// Authentication models
pub use crate::model::auth::{ApiStatus, CredentialPair, User};

/// Contact models
pub use crate::model::contact::{
    Contact, ContactFormData, ContactListParams, ContactListResponse,
};

// ============================================================================
// STORAGE
// ============================================================================

/// Key-value backends
pub use crate::storage::{FileStorage, MemoryStorage, Storage};

/// Storage configuration
pub use crate::storage::config::StorageConfig;

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Validation utilities
pub use crate::utils::validation::{ValidationErrors, validate_contact_form};

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tracing::{debug, error, info, warn};

/// Re-export reqwest's method type for custom requests
pub use reqwest::Method;
