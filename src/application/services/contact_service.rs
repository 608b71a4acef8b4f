use crate::application::interfaces::contact::ContactService;
use crate::error::AppError;
use crate::model::contact::{Contact, ContactFormData, ContactListParams, ContactListResponse};
use crate::model::http::HttpClient;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Contacts service backed by the REST API
pub struct ContactServiceImpl {
    client: Arc<HttpClient>,
}

impl ContactServiceImpl {
    /// Creates a new instance of the contacts service
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Gets the underlying HTTP client
    pub fn client(&self) -> &Arc<HttpClient> {
        &self.client
    }
}

fn contact_endpoint(id: &str) -> String {
    format!("{}{id}/", crate::constants::CONTACTS_ENDPOINT)
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn list_contacts(
        &self,
        params: &ContactListParams,
    ) -> Result<ContactListResponse, AppError> {
        let endpoint = params.to_endpoint()?;
        debug!("Listing contacts: {}", endpoint);

        let page: ContactListResponse = self.client.get(&endpoint).await?;

        debug!(
            "Contacts obtained: {} of {}",
            page.results.len(),
            page.count
        );
        Ok(page)
    }

    async fn create_contact(&self, form: &ContactFormData) -> Result<Contact, AppError> {
        info!("Creating contact {}", form.name);
        let contact: Contact = self
            .client
            .post(crate::constants::CONTACTS_ENDPOINT, form)
            .await?;
        debug!("Contact created with id {}", contact.id);
        Ok(contact)
    }

    async fn update_contact(&self, id: &str, form: &ContactFormData) -> Result<Contact, AppError> {
        info!("Updating contact {}", id);
        self.client.put(&contact_endpoint(id), form).await
    }

    async fn delete_contact(&self, id: &str) -> Result<(), AppError> {
        info!("Deleting contact {}", id);
        self.client.delete(&contact_endpoint(id)).await
    }
}
