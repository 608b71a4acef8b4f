use crate::error::AppError;
use crate::model::contact::{Contact, ContactFormData, ContactListParams, ContactListResponse};
use async_trait::async_trait;

/// Interface for the contacts service
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Gets one page of contacts
    ///
    /// # Arguments
    /// * `params` - Page, page size, search and ordering; zero or empty values are not sent
    async fn list_contacts(&self, params: &ContactListParams)
    -> Result<ContactListResponse, AppError>;

    /// Creates a contact and returns it as stored by the server
    async fn create_contact(&self, form: &ContactFormData) -> Result<Contact, AppError>;

    /// Replaces every editable field of contact `id`
    async fn update_contact(&self, id: &str, form: &ContactFormData) -> Result<Contact, AppError>;

    /// Deletes contact `id`
    async fn delete_contact(&self, id: &str) -> Result<(), AppError>;
}
