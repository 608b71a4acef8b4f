/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Authentication controller
//!
//! Drives login, registration and logout, and owns the identity of the
//! logged in user. The user is rebuilt from the persisted username whenever
//! a credential pair is stored, so a restarted process comes back logged in.

use crate::application::interfaces::auth::AuthService;
use crate::application::session::Session;
use crate::error::AppError;
use crate::model::auth::User;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

/// Raises the logging-in flag until dropped
struct LoggingIn<'a>(&'a AtomicBool);

impl<'a> LoggingIn<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoggingIn<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Login state machine on top of an [`AuthService`]
pub struct AuthController<A: AuthService> {
    service: A,
    session: Arc<Session>,
    logging_in: AtomicBool,
}

impl<A: AuthService> AuthController<A> {
    /// Creates a controller over `service`, reading identity from `session`
    pub fn new(service: A, session: Arc<Session>) -> Self {
        Self {
            service,
            session,
            logging_in: AtomicBool::new(false),
        }
    }

    /// The logged in user, if any
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    /// Whether a login or registration is pending
    #[must_use]
    pub fn is_logging_in(&self) -> bool {
        self.logging_in.load(Ordering::SeqCst)
    }

    /// Logs in and remembers the username
    ///
    /// # Returns
    /// * `Ok(User)` - The logged in user
    /// * `Err(AppError)` - The failure reported by the service; nothing is persisted
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AppError> {
        let pending = LoggingIn::start(&self.logging_in);
        let result = self.service.login(username, password).await;
        drop(pending);

        match result {
            Ok(_) => self.remember(username),
            Err(e) => {
                error!("Login failed for {}: {}", username, e);
                Err(e)
            }
        }
    }

    /// Registers a new account and logs it in
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        let pending = LoggingIn::start(&self.logging_in);
        let result = self.service.register(username, password).await;
        drop(pending);

        match result {
            Ok(_) => self.remember(username),
            Err(e) => {
                error!("Registration failed for {}: {}", username, e);
                Err(e)
            }
        }
    }

    fn remember(&self, username: &str) -> Result<User, AppError> {
        self.session.set_username(Some(username))?;
        info!("Logged in as {}", username);
        Ok(User::new(username))
    }

    /// Forgets the credentials and the username
    pub fn logout(&self) {
        self.service.logout();
        if let Err(e) = self.session.set_username(None) {
            warn!("Failed to clear stored username: {}", e);
        }
        info!("Logged out successfully");
    }
}
