/// Authentication service interface
pub mod auth;
/// Contacts service interface
pub mod contact;
