/// Module containing the authentication service
pub mod auth_service;
/// Module containing the contacts service
pub mod contact_service;

pub use crate::application::interfaces::auth::*;
pub use crate::application::interfaces::contact::*;
pub use auth_service::AuthServiceImpl;
pub use contact_service::ContactServiceImpl;
