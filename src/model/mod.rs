/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
/// Authentication models: credential pair, user, login bodies
pub mod auth;
/// Contact records, form data and list queries
pub mod contact;
/// Session-aware HTTP client with token refresh
pub mod http;
