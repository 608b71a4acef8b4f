/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Session-aware HTTP client for the contacts API
//!
//! This module provides the client every other layer goes through. It handles:
//! - Bearer authentication from the persisted credential pair
//! - Transparent token refresh when the server answers 401, followed by a
//!   single retry of the original call
//! - Coalescing of concurrent refreshes: every caller rejected with the same
//!   access token shares one refresh request
//! - Mapping responses onto [`AppError`]
//!
//! # Example
//! ```ignore
//! use contacts_client::prelude::*;
//!
//! let config = Config::new();
//! let session = Arc::new(Session::from_config(&config)?);
//! let client = HttpClient::new(&config, session)?;
//!
//! client.login("ann", "secret").await?;
//! let page: ContactListResponse = client.get("/contacts/").await?;
//! ```

use crate::application::config::Config;
use crate::application::rate_limiter::RateLimiter;
use crate::application::session::Session;
use crate::constants::{
    HEALTH_ENDPOINT, REGISTER_ENDPOINT, TOKEN_ENDPOINT, TOKEN_REFRESH_ENDPOINT, USER_AGENT,
};
use crate::error::AppError;
use crate::model::auth::{ApiStatus, CredentialPair, LoginRequest, RefreshRequest};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, warn};

/// Method, body and extra headers of a request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method, `GET` by default
    pub method: Method,
    /// JSON body
    pub body: Option<Value>,
    /// Extra headers, applied after `Content-Type` and before `Authorization`
    pub headers: HeaderMap,
}

impl RequestOptions {
    /// Options for a body-less request with `method`
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Serializes `body` as the JSON body of the request
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, AppError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Adds an extra header
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, AppError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::InvalidInput(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| AppError::InvalidInput(format!("invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }
}

/// Body of a successful refresh; servers that do not rotate refresh tokens
/// only send a new access token
#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
    refresh: Option<String>,
}

impl RefreshResponse {
    fn into_pair(self, previous_refresh: &str) -> CredentialPair {
        let refresh = self
            .refresh
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| previous_refresh.to_string());
        CredentialPair::new(self.access, refresh)
    }
}

type RefreshOutcome = Option<Result<CredentialPair, AppError>>;

/// The refresh started for one rejected access token
struct RefreshSlot {
    rejected: String,
    outcome: watch::Receiver<RefreshOutcome>,
}

impl RefreshSlot {
    fn is_settled(&self) -> bool {
        self.outcome.borrow().is_some()
    }

    fn is_pending(&self) -> bool {
        !self.is_settled() && self.outcome.has_changed().is_ok()
    }

    // Leader dropped before publishing an outcome
    fn is_abandoned(&self) -> bool {
        !self.is_settled() && self.outcome.has_changed().is_err()
    }
}

/// Session-aware client for the contacts API
pub struct HttpClient {
    session: Arc<Session>,
    http_client: Client,
    rate_limiter: Option<RateLimiter>,
    refresh_gate: Mutex<Option<RefreshSlot>>,
}

impl HttpClient {
    /// Creates a new client over `session`
    ///
    /// No request is made; the stored credentials, if any, are used as is.
    ///
    /// # Arguments
    /// * `config` - Timeout and rate limiter settings
    /// * `session` - Persisted API base and credentials
    ///
    /// # Returns
    /// * `Ok(HttpClient)` - Client ready to use
    /// * `Err(AppError)` - If the underlying HTTP client cannot be built
    pub fn new(config: &Config, session: Arc<Session>) -> Result<Self, AppError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.rest_api.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            session,
            http_client: builder.build()?,
            rate_limiter: RateLimiter::new(&config.rate_limiter),
            refresh_gate: Mutex::new(None),
        })
    }

    /// The session this client reads its base URL and credentials from
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Makes a GET request and deserializes the response body
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, AppError> {
        let value = self
            .request(endpoint, &RequestOptions::new(Method::GET), false)
            .await?;
        decode(value)
    }

    /// Makes a POST request with a JSON body and deserializes the response body
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let options = RequestOptions::new(Method::POST).with_body(body)?;
        decode(self.request(endpoint, &options, false).await?)
    }

    /// Makes a PUT request with a JSON body and deserializes the response body
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let options = RequestOptions::new(Method::PUT).with_body(body)?;
        decode(self.request(endpoint, &options, false).await?)
    }

    /// Makes a DELETE request, discarding any response body
    pub async fn delete(&self, endpoint: &str) -> Result<(), AppError> {
        self.request(endpoint, &RequestOptions::new(Method::DELETE), false)
            .await?;
        Ok(())
    }

    /// Performs a request against `{api_base}{endpoint}`
    ///
    /// Unless `skip_auth` is set, the stored access token is sent as a bearer
    /// token. A 401 answer triggers (or joins) a token refresh, after which
    /// the request is retried exactly once.
    ///
    /// # Returns
    /// * `Ok(Some(Value))` - JSON body of a successful response
    /// * `Ok(None)` - Successful response without a JSON body
    /// * `Err(AppError::Unauthorized)` - 401 after the retry, or the refresh failed
    /// * `Err(AppError::Http)` - Any other non-2xx response
    /// * `Err(AppError::Network)` - No response at all
    pub async fn request(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        skip_auth: bool,
    ) -> Result<Option<Value>, AppError> {
        let (mut response, sent_token) = self.send(endpoint, options, skip_auth).await?;

        if response.status() == StatusCode::UNAUTHORIZED && !skip_auth {
            warn!(
                "{} {} rejected with 401, refreshing access token",
                options.method, endpoint
            );
            self.refresh_for(sent_token.as_deref()).await?;
            (response, _) = self.send(endpoint, options, skip_auth).await?;
        }

        parse_response(response).await
    }

    /// Sends one request, returning the response and the access token it carried
    async fn send(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        skip_auth: bool,
    ) -> Result<(Response, Option<String>), AppError> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.wait().await;
        }

        let url = format!("{}{}", self.session.api_base(), endpoint);
        debug!("{} {}", options.method, url);

        let mut request = self
            .http_client
            .request(options.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .headers(options.headers.clone());

        let access = if skip_auth {
            None
        } else {
            self.session.access_token()
        };
        if let Some(token) = &access {
            request = request.bearer_auth(token);
        }

        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!("{} {} failed: {}", options.method, url, e);
            AppError::from(e)
        })?;
        debug!("Response status: {}", response.status());

        Ok((response, access))
    }

    /// Obtains fresh credentials after `rejected` was refused by the server
    ///
    /// Callers rejected with the same token share one refresh: the first
    /// starts it, the others wait for its outcome, and late callers receive
    /// the settled outcome of a successful refresh. A failed refresh is
    /// forgotten once published. The gate is never held across network I/O.
    async fn refresh_for(&self, rejected: Option<&str>) -> Result<CredentialPair, AppError> {
        let Some(rejected) = rejected else {
            // Nothing was sent, so there is nothing to share
            return match self.session.tokens() {
                Some(tokens) => Ok(tokens),
                None => self.refresh_tokens().await,
            };
        };

        loop {
            let mut gate = self.refresh_gate.lock().await;

            if let Some(slot) = gate.as_ref().filter(|s| s.rejected == rejected) {
                let mut outcome = slot.outcome.clone();
                drop(gate);
                debug!("Waiting for the token refresh already in progress");

                let settled = outcome
                    .wait_for(Option::is_some)
                    .await
                    .map(|settled| (*settled).clone());
                match settled {
                    Ok(Some(result)) => return result,
                    Ok(None) => {}
                    Err(_) => {
                        warn!("Token refresh was abandoned, starting a new one");
                        let mut gate = self.refresh_gate.lock().await;
                        if gate.as_ref().is_some_and(RefreshSlot::is_abandoned) {
                            *gate = None;
                        }
                    }
                }
                continue;
            }

            if let Some(current) = self.session.tokens() {
                if current.access != rejected {
                    debug!("Access token already replaced, retrying with the stored one");
                    return Ok(current);
                }
            }

            let (tx, rx) = watch::channel(None);
            let own = rx.clone();
            *gate = Some(RefreshSlot {
                rejected: rejected.to_string(),
                outcome: rx,
            });
            drop(gate);

            let result = self.refresh_tokens().await;
            tx.send_replace(Some(result.clone()));

            // Waiters already joined keep the error; later 401s start over
            if result.is_err() {
                let mut gate = self.refresh_gate.lock().await;
                if gate.as_ref().is_some_and(|s| s.outcome.same_channel(&own)) {
                    *gate = None;
                }
            }
            return result;
        }
    }

    /// Whether a token refresh is currently in flight
    pub async fn is_refreshing(&self) -> bool {
        self.refresh_gate
            .lock()
            .await
            .as_ref()
            .is_some_and(RefreshSlot::is_pending)
    }

    /// Exchanges the stored refresh token for a new credential pair
    ///
    /// # Returns
    /// * `Ok(CredentialPair)` - The new pair, already persisted
    /// * `Err(AppError::Unauthorized)` - No refresh token is stored (no request
    ///   is made), or the server refused it (stored tokens are cleared)
    /// * `Err(AppError::Network)` - The refresh request never completed
    pub async fn refresh_tokens(&self) -> Result<CredentialPair, AppError> {
        let Some(tokens) = self.session.tokens() else {
            warn!("No refresh token available");
            return Err(AppError::unauthorized("No refresh token available"));
        };

        info!("Refreshing access token");
        let options = RequestOptions::new(Method::POST).with_body(&RefreshRequest {
            refresh: &tokens.refresh,
        })?;
        let (response, _) = self.send(TOKEN_REFRESH_ENDPOINT, &options, true).await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("Token refresh failed with status {}: {}", status, body);
            self.session.clear_tokens();
            return Err(AppError::Unauthorized {
                status: status.as_u16(),
                message: "Token refresh failed".to_string(),
                payload: serde_json::from_str(&body).ok(),
            });
        }

        let refreshed: RefreshResponse = serde_json::from_str(&body)?;
        let pair = refreshed.into_pair(&tokens.refresh);
        self.session.set_tokens(Some(&pair))?;

        info!("Access token refreshed");
        Ok(pair)
    }

    /// Logs in with username and password, persisting the returned pair
    pub async fn login(&self, username: &str, password: &str) -> Result<CredentialPair, AppError> {
        info!("Logging in as {}", username);
        self.obtain_tokens(TOKEN_ENDPOINT, username, password).await
    }

    /// Registers a new account, persisting the returned pair
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<CredentialPair, AppError> {
        info!("Registering {}", username);
        self.obtain_tokens(REGISTER_ENDPOINT, username, password)
            .await
    }

    async fn obtain_tokens(
        &self,
        endpoint: &str,
        username: &str,
        password: &str,
    ) -> Result<CredentialPair, AppError> {
        let options = RequestOptions::new(Method::POST).with_body(&LoginRequest { username, password })?;
        let pair: CredentialPair = decode(self.request(endpoint, &options, true).await?)?;
        self.session.set_tokens(Some(&pair))?;
        Ok(pair)
    }

    /// Exchanges an explicit refresh token for a new pair, persisting it
    ///
    /// Unlike the automatic refresh, a refused token leaves the stored pair
    /// untouched and the error follows the usual response mapping.
    pub async fn refresh(&self, refresh_token: &str) -> Result<CredentialPair, AppError> {
        let options = RequestOptions::new(Method::POST).with_body(&RefreshRequest {
            refresh: refresh_token,
        })?;
        let refreshed: RefreshResponse =
            decode(self.request(TOKEN_REFRESH_ENDPOINT, &options, true).await?)?;
        let pair = refreshed.into_pair(refresh_token);
        self.session.set_tokens(Some(&pair))?;
        Ok(pair)
    }

    /// Forgets the stored credentials; makes no request
    pub fn logout(&self) {
        info!("Logging out");
        self.session.clear_tokens();
    }

    /// Whether a credential pair is stored
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// The stored credential pair
    #[must_use]
    pub fn current_tokens(&self) -> Option<CredentialPair> {
        self.session.tokens()
    }

    /// Removes the stored credential pair
    pub fn clear_tokens(&self) {
        self.session.clear_tokens();
    }

    /// Probes `GET /health` without authentication
    pub async fn health(&self) -> ApiStatus {
        let options = RequestOptions::new(Method::GET);
        match self.send(HEALTH_ENDPOINT, &options, true).await {
            Ok((response, _)) if response.status().is_success() => {
                debug!("API status check successful");
                ApiStatus::Online
            }
            Ok((response, _)) => {
                warn!("API status check failed with status {}", response.status());
                ApiStatus::Offline
            }
            Err(e) => {
                warn!("API status check error: {}", e);
                ApiStatus::Offline
            }
        }
    }
}

/// Reads a response, mapping non-2xx statuses onto errors
async fn parse_response(response: Response) -> Result<Option<Value>, AppError> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    let body = response.text().await?;

    if !status.is_success() {
        return Err(error_from_response(status, &body));
    }

    if is_json && !body.trim().is_empty() {
        Ok(Some(serde_json::from_str(&body)?))
    } else {
        Ok(None)
    }
}

/// Builds the error for a non-2xx response
///
/// The payload is the JSON body, or `{"message": <status text>}` when the
/// body is not JSON. The message comes from the payload's `message` or
/// `detail` field, else `HTTP <status>`.
pub fn error_from_response(status: StatusCode, body: &str) -> AppError {
    let payload = serde_json::from_str::<Value>(body)
        .unwrap_or_else(|_| json!({ "message": status.canonical_reason().unwrap_or_default() }));
    let message = ["message", "detail"]
        .iter()
        .filter_map(|key| payload.get(*key).and_then(Value::as_str))
        .find(|m| !m.is_empty())
        .map(String::from)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    error!("Request failed with status {}: {}", status, message);

    let status = status.as_u16();
    if status == StatusCode::UNAUTHORIZED.as_u16() {
        AppError::Unauthorized {
            status,
            message,
            payload: Some(payload),
        }
    } else {
        AppError::Http {
            status,
            message,
            payload: Some(payload),
        }
    }
}

fn decode<T: DeserializeOwned>(value: Option<Value>) -> Result<T, AppError> {
    let value =
        value.ok_or_else(|| AppError::Deserialization("expected a JSON response body".to_string()))?;
    Ok(serde_json::from_value(value)?)
}
