use crate::error::AppError;
use crate::model::auth::CredentialPair;
use async_trait::async_trait;

/// Interface for the authentication service
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges username and password for a credential pair
    async fn login(&self, username: &str, password: &str) -> Result<CredentialPair, AppError>;

    /// Creates an account and returns its first credential pair
    async fn register(&self, username: &str, password: &str) -> Result<CredentialPair, AppError>;

    /// Forgets the stored credentials
    fn logout(&self);
}
