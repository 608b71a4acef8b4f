/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

/// Access and refresh tokens, persisted together
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialPair {
    /// Short-lived token sent as `Authorization: Bearer <access>`
    pub access: String,
    /// Longer-lived token used to obtain a new pair
    pub refresh: String,
}

impl CredentialPair {
    /// Creates a new credential pair
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }

    /// A pair is usable only when both tokens are non-empty
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.access.is_empty() && !self.refresh.is_empty()
    }
}

/// Body of `POST /token/` and `POST /auth/register/`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    /// Account name
    pub username: &'a str,
    /// Account password
    pub password: &'a str,
}

/// Body of `POST /token/refresh/`
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    /// Refresh token being exchanged
    pub refresh: &'a str,
}

/// The authenticated user as known to the client
#[derive(Debug, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct User {
    /// Login name
    pub username: String,
}

impl User {
    /// Creates a user from its login name
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Result of probing `GET /health`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    /// The probe answered with a 2xx status
    Online,
    /// The probe failed or answered with a non-2xx status
    Offline,
}

impl ApiStatus {
    /// Whether the API answered the probe
    #[must_use]
    pub fn is_online(self) -> bool {
        self == Self::Online
    }
}
