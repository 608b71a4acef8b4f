//! Client-side validation of contact forms, run before any create or update
//! request is sent.

use crate::model::contact::ContactFormData;
use once_cell::sync::Lazy;
use pretty_simple_display::DisplaySimple;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6,15}$").expect("valid phone regex"));
static PHONE_SEPARATORS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-()]").expect("valid separator regex"));

/// Per-field validation messages; a `None` field passed validation
#[derive(Debug, Clone, Default, DisplaySimple, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Message for the name field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Message for the email field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Message for the phone field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Message for the company field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Message for the notes field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ValidationErrors {
    /// True when no field carries an error
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.company.is_none()
            && self.notes.is_none()
    }
}

/// Checks an email address against a loose `local@domain.tld` shape
#[must_use]
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Checks that a phone number has 6 to 15 digits once spaces, dashes and
/// parentheses are removed
#[must_use]
pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE.is_match(&PHONE_SEPARATORS_RE.replace_all(phone, ""))
}

/// Validates a contact form, returning the messages for every failing field
#[must_use]
pub fn validate_contact_form(data: &ContactFormData) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if data.name.trim().is_empty() {
        errors.name = Some("Name is required".to_string());
    }

    if data.email.trim().is_empty() {
        errors.email = Some("Email is required".to_string());
    } else if !validate_email(&data.email) {
        errors.email = Some("Invalid email format".to_string());
    }

    if data.phone.trim().is_empty() {
        errors.phone = Some("Phone is required".to_string());
    } else if !validate_phone(&data.phone) {
        errors.phone = Some("Phone must be 6-15 digits only".to_string());
    }

    if data.company.trim().is_empty() {
        errors.company = Some("Company is required".to_string());
    }

    errors
}
