use crate::application::interfaces::auth::AuthService;
use crate::error::AppError;
use crate::model::auth::CredentialPair;
use crate::model::http::HttpClient;
use async_trait::async_trait;
use std::sync::Arc;

/// Authentication service backed by the token endpoints
pub struct AuthServiceImpl {
    client: Arc<HttpClient>,
}

impl AuthServiceImpl {
    /// Creates a new instance of the authentication service
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, username: &str, password: &str) -> Result<CredentialPair, AppError> {
        self.client.login(username, password).await
    }

    async fn register(&self, username: &str, password: &str) -> Result<CredentialPair, AppError> {
        self.client.register(username, password).await
    }

    fn logout(&self) {
        self.client.logout();
    }
}
