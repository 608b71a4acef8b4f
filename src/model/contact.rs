/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use crate::error::AppError;
use chrono::{DateTime, Utc};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

/// A contact record as returned by the server
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Contact {
    /// Server assigned identifier
    pub id: String,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number as entered
    pub phone: String,
    /// Company name
    pub company: String,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Creation timestamp as sent by the server
    #[serde(default)]
    pub created: String,
}

impl Contact {
    /// Parses the `created` timestamp as RFC 3339
    ///
    /// # Returns
    /// * `Ok(DateTime<Utc>)` - The creation instant
    /// * `Err(AppError::Deserialization)` - If the server sent something else
    pub fn created_at(&self) -> Result<DateTime<Utc>, AppError> {
        DateTime::parse_from_rfc3339(&self.created)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                AppError::Deserialization(format!("invalid created timestamp {:?}: {e}", self.created))
            })
    }

    /// Form data holding this contact's editable fields
    #[must_use]
    pub fn to_form(&self) -> ContactFormData {
        ContactFormData {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            company: self.company.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Payload of create and update requests
#[derive(Debug, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContactFormData {
    /// Full name, required
    pub name: String,
    /// Email address, required
    pub email: String,
    /// Phone number, required
    pub phone: String,
    /// Company name, required
    pub company: String,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

/// Query parameters of `GET /contacts/`
///
/// Fields left at their zero value are not sent.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ContactListParams {
    /// 1-based page number
    #[serde(skip_serializing_if = "is_zero")]
    pub page: u32,
    /// Number of contacts per page
    #[serde(skip_serializing_if = "is_zero")]
    pub page_size: u32,
    /// Free text search
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    /// Ordering expression understood by the server, e.g. `-created`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ordering: String,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl ContactListParams {
    /// Builds the list endpoint path including its query string
    ///
    /// # Example
    /// ```
    /// use contacts_client::model::contact::ContactListParams;
    ///
    /// let params = ContactListParams {
    ///     page: 2,
    ///     page_size: 5,
    ///     search: "ann".to_string(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(params.to_endpoint().unwrap(), "/contacts/?page=2&page_size=5&search=ann");
    /// ```
    pub fn to_endpoint(&self) -> Result<String, AppError> {
        let query = serde_urlencoded::to_string(self)?;
        if query.is_empty() {
            Ok(crate::constants::CONTACTS_ENDPOINT.to_string())
        } else {
            Ok(format!("{}?{query}", crate::constants::CONTACTS_ENDPOINT))
        }
    }
}

/// One page of `GET /contacts/`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContactListResponse {
    /// Total number of contacts matching the query
    pub count: u64,
    /// URL of the next page
    pub next: Option<String>,
    /// URL of the previous page
    pub previous: Option<String>,
    /// Contacts of this page
    pub results: Vec<Contact>,
}
