/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Error types shared by every layer of the client.
//!
//! Failures fall in three families:
//! - authorization: missing, invalid or expired credentials ([`AppError::Unauthorized`])
//! - HTTP: any other non-2xx response ([`AppError::Http`])
//! - transport: the request never completed ([`AppError::Network`], status 0)
//!
//! The remaining variants cover local problems (decoding, persistence, input).

use crate::utils::validation::ValidationErrors;
use serde_json::Value;
use thiserror::Error;

/// Main error type for the library
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Missing, rejected or expired credentials
    #[error("unauthorized ({status}): {message}")]
    Unauthorized {
        /// HTTP status reported by the server (401 when raised locally)
        status: u16,
        /// Human readable message
        message: String,
        /// Parsed error body, when there was one
        payload: Option<Value>,
    },
    /// Non-2xx response
    #[error("http error {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Message taken from the payload or the status line
        message: String,
        /// Parsed error body, or `{"message": <status text>}`
        payload: Option<Value>,
    },
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),
    /// Malformed JSON
    #[error("json error: {0}")]
    Json(String),
    /// JSON that does not match the expected shape, or a missing body
    #[error("deserialization error: {0}")]
    Deserialization(String),
    /// Persistence backend failure
    #[error("storage error: {0}")]
    Storage(String),
    /// Filesystem failure
    #[error("io error: {0}")]
    Io(String),
    /// Rejected argument
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Contact form rejected before submission
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
}

impl AppError {
    /// Builds an authorization error raised without a server response
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            status: 401,
            message: message.into(),
            payload: None,
        }
    }

    /// HTTP-style status of the error
    ///
    /// Transport failures report 0; local errors that never reached the
    /// server report 0 as well, except validation (422) and invalid input (400).
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Unauthorized { status, .. } | Self::Http { status, .. } => *status,
            Self::Validation(_) => 422,
            Self::InvalidInput(_) => 400,
            Self::Network(_)
            | Self::Json(_)
            | Self::Deserialization(_)
            | Self::Storage(_)
            | Self::Io(_) => 0,
        }
    }

    /// Parsed error payload returned by the server, if any
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Unauthorized { payload, .. } | Self::Http { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Whether this is an authorization error
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            Self::Deserialization(err.to_string())
        } else {
            Self::Json(err.to_string())
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for AppError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
