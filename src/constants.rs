/// Storage key holding the API base URL
pub const API_BASE_STORAGE_KEY: &str = "api_base_url";
/// Storage key holding the serialized credential pair
pub const TOKEN_STORAGE_KEY: &str = "auth_tokens";
/// Storage key holding the username of the logged in user
pub const USERNAME_STORAGE_KEY: &str = "current_username";
/// API base URL used when nothing is configured or persisted
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
/// Default number of contacts per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// User agent string sent with every request
pub const USER_AGENT: &str = concat!("contacts-client/", env!("CARGO_PKG_VERSION"));

/// Endpoint issuing a credential pair for username/password
pub const TOKEN_ENDPOINT: &str = "/token/";
/// Endpoint exchanging a refresh token for a new credential pair
pub const TOKEN_REFRESH_ENDPOINT: &str = "/token/refresh/";
/// Endpoint creating a user account
pub const REGISTER_ENDPOINT: &str = "/auth/register/";
/// Contacts collection endpoint
pub const CONTACTS_ENDPOINT: &str = "/contacts/";
/// Unauthenticated status probe
pub const HEALTH_ENDPOINT: &str = "/health";
