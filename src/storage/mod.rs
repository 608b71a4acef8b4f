/// Module containing storage configuration structures
pub mod config;
/// Module containing the in-memory and file backed key-value stores
pub mod kv;
/// Module containing JSON helpers and backend construction
pub mod utils;

pub use kv::{FileStorage, MemoryStorage, Storage};
