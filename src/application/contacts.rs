/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Contacts controller
//!
//! Keeps the window of contacts a front-end displays (page, page size,
//! search, ordering) together with the fetched page, and routes create,
//! update and delete through a [`ContactService`], refetching afterwards.
//!
//! Fetches may overlap. Each one is tagged with a sequence number and only
//! the most recently issued fetch may write its result; older responses are
//! discarded with [`FetchOutcome::Stale`].

use crate::application::config::Config;
use crate::application::interfaces::contact::ContactService;
use crate::application::session::Session;
use crate::error::AppError;
use crate::model::contact::{Contact, ContactFormData, ContactListParams};
use crate::utils::validation::validate_contact_form;
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Snapshot of the controller state
#[derive(Debug, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactsState {
    /// Contacts of the current page
    pub contacts: Vec<Contact>,
    /// Total number of contacts matching the search
    pub total: u64,
    /// Search query, empty for none
    pub search: String,
    /// Current page, starting at 1
    pub page: u32,
    /// Contacts per page
    pub page_size: u32,
    /// Ordering expression, empty for the server default
    pub ordering: String,
}

impl ContactsState {
    fn new(page_size: u32) -> Self {
        Self {
            contacts: Vec::new(),
            total: 0,
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
            ordering: String::new(),
        }
    }

    /// Number of pages needed to show every matching contact
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page_size.max(1)))
    }

    fn list_params(&self) -> ContactListParams {
        ContactListParams {
            page: self.page,
            page_size: self.page_size,
            search: self.search.clone(),
            ordering: self.ordering.clone(),
        }
    }

    fn clear_results(&mut self) {
        self.contacts.clear();
        self.total = 0;
    }
}

/// What happened to the result of a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was stored
    Applied,
    /// A newer fetch was issued meanwhile; the result was dropped
    Stale,
    /// Nobody is logged in; the contacts were cleared without a request
    SignedOut,
}

/// Counts one pending request until dropped, including when the caller
/// abandons the future
struct Pending<'a>(&'a AtomicUsize);

impl<'a> Pending<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Pagination and search state over a [`ContactService`]
pub struct ContactsController<S: ContactService> {
    service: S,
    session: Arc<Session>,
    state: RwLock<ContactsState>,
    latest_fetch: AtomicU64,
    in_flight: AtomicUsize,
}

impl<S: ContactService> ContactsController<S> {
    /// Creates a controller starting on page 1 with the configured page size
    pub fn new(service: S, session: Arc<Session>, config: &Config) -> Self {
        Self::with_page_size(service, session, config.page_size)
    }

    /// Creates a controller starting on page 1 with `page_size` contacts per page
    pub fn with_page_size(service: S, session: Arc<Session>, page_size: u32) -> Self {
        Self {
            service,
            session,
            state: RwLock::new(ContactsState::new(page_size)),
            latest_fetch: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// A copy of the current state
    pub async fn state(&self) -> ContactsState {
        self.state.read().await.clone()
    }

    /// Contacts of the current page
    pub async fn contacts(&self) -> Vec<Contact> {
        self.state.read().await.contacts.clone()
    }

    /// Total number of contacts matching the search
    pub async fn total(&self) -> u64 {
        self.state.read().await.total
    }

    /// Current page
    pub async fn page(&self) -> u32 {
        self.state.read().await.page
    }

    /// Number of pages
    pub async fn total_pages(&self) -> u64 {
        self.state.read().await.total_pages()
    }

    /// Whether any request started by this controller is pending
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Sets the search query; a changed query goes back to page 1
    ///
    /// Returns whether the query changed.
    pub async fn set_search(&self, query: impl Into<String>) -> bool {
        let query = query.into();
        let mut state = self.state.write().await;
        if state.search == query {
            return false;
        }
        state.search = query;
        state.page = 1;
        true
    }

    /// Moves to `page`
    pub async fn set_page(&self, page: u32) -> Result<(), AppError> {
        if page == 0 {
            return Err(AppError::InvalidInput("page starts at 1".to_string()));
        }
        self.state.write().await.page = page;
        Ok(())
    }

    /// Changes the page size and goes back to page 1
    pub async fn set_page_size(&self, page_size: u32) -> Result<(), AppError> {
        if page_size == 0 {
            return Err(AppError::InvalidInput("page size must be positive".to_string()));
        }
        let mut state = self.state.write().await;
        state.page_size = page_size;
        state.page = 1;
        Ok(())
    }

    /// Sets the ordering expression, empty for the server default
    pub async fn set_ordering(&self, ordering: impl Into<String>) {
        self.state.write().await.ordering = ordering.into();
    }

    /// Loads the current page
    ///
    /// # Returns
    /// * `Ok(FetchOutcome)` - Whether the result was stored
    /// * `Err(AppError)` - The latest fetch failed; contacts and total were cleared
    pub async fn fetch(&self) -> Result<FetchOutcome, AppError> {
        let seq = self.latest_fetch.fetch_add(1, Ordering::SeqCst) + 1;

        if self.session.current_user().is_none() {
            self.state.write().await.clear_results();
            debug!("No user logged in, contacts cleared");
            return Ok(FetchOutcome::SignedOut);
        }

        let params = self.state.read().await.list_params();

        let loading = Pending::start(&self.in_flight);
        let result = self.service.list_contacts(&params).await;
        drop(loading);

        let mut state = self.state.write().await;
        if seq != self.latest_fetch.load(Ordering::SeqCst) {
            debug!("Discarding result of superseded fetch {}", seq);
            return Ok(FetchOutcome::Stale);
        }

        match result {
            Ok(page) => {
                state.contacts = page.results;
                state.total = page.count;
                Ok(FetchOutcome::Applied)
            }
            Err(e) => {
                state.clear_results();
                Err(e)
            }
        }
    }

    async fn refetch_after_change(&self) {
        if let Err(e) = self.fetch().await {
            warn!("Failed to refresh contacts: {}", e);
        }
    }

    /// Validates and creates a contact, then shows page 1
    ///
    /// # Returns
    /// * `Ok(Contact)` - The created contact
    /// * `Err(AppError::Validation)` - The form was rejected before sending
    /// * `Err(AppError)` - The create request failed
    pub async fn create(&self, form: &ContactFormData) -> Result<Contact, AppError> {
        validate(form)?;

        let loading = Pending::start(&self.in_flight);
        let result = self.service.create_contact(form).await;
        drop(loading);
        let contact = result?;
        info!("Contact created successfully");

        self.state.write().await.page = 1;
        self.refetch_after_change().await;
        Ok(contact)
    }

    /// Validates and replaces contact `id`, then reloads the current page
    pub async fn update(&self, id: &str, form: &ContactFormData) -> Result<Contact, AppError> {
        validate(form)?;

        let loading = Pending::start(&self.in_flight);
        let result = self.service.update_contact(id, form).await;
        drop(loading);
        let contact = result?;
        info!("Contact updated successfully");

        self.refetch_after_change().await;
        Ok(contact)
    }

    /// Deletes contact `id`, then reloads
    ///
    /// When the deleted contact was the only one on a page past the first,
    /// the controller steps back one page before reloading.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let loading = Pending::start(&self.in_flight);
        let result = self.service.delete_contact(id).await;
        drop(loading);
        result?;
        info!("Contact deleted successfully");

        {
            let mut state = self.state.write().await;
            if state.contacts.len() == 1 && state.page > 1 {
                state.page -= 1;
                debug!("Page emptied, moving back to page {}", state.page);
            }
        }

        self.refetch_after_change().await;
        Ok(())
    }

    /// Resets to an empty first page with no search
    ///
    /// Fetches still in flight are discarded when they complete.
    pub async fn clear(&self) {
        self.latest_fetch.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().await;
        state.clear_results();
        state.page = 1;
        state.search.clear();
    }
}

fn validate(form: &ContactFormData) -> Result<(), AppError> {
    let errors = validate_contact_form(form);
    if errors.is_empty() {
        Ok(())
    } else {
        warn!("Contact form rejected: {}", errors);
        Err(AppError::Validation(errors))
    }
}
