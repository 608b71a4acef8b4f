/// Module containing environment variable helpers
pub mod config;
/// Module containing logging utilities
pub mod logger;
/// Module containing contact form validation
pub mod validation;

pub use config::*;
pub use logger::*;
pub use validation::*;
