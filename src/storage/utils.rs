use crate::error::AppError;
use crate::storage::Storage;
use crate::storage::config::StorageConfig;
use crate::storage::kv::{FileStorage, MemoryStorage};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{info, warn};

/// Serializes a value to a JSON string
pub fn serialize_to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Deserializes a JSON string into a value
pub fn deserialize_from_json<T: DeserializeOwned>(s: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(s)
}

/// Reads a JSON value stored under `key`
///
/// A value that does not parse is logged and reported as absent.
///
/// # Returns
/// * `Ok(Some(T))` - The stored value
/// * `Ok(None)` - Nothing stored, or the stored text is not a valid `T`
/// * `Err(AppError)` - If the backend failed
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>, AppError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    match deserialize_from_json(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Ignoring unreadable value stored under {}: {}", key, e);
            Ok(None)
        }
    }
}

/// Stores `value` as JSON under `key`
pub fn store_json<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) -> Result<(), AppError> {
    storage.set(key, &serialize_to_json(value)?)
}

/// Creates the storage backend described by the configuration
///
/// # Arguments
/// * `config` - Storage configuration; a path selects the JSON file backend
///
/// # Returns
/// * `Result<Arc<dyn Storage>, AppError>` - The backend or an error if the file cannot be read
pub fn create_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>, AppError> {
    match &config.path {
        Some(path) => {
            info!("Persisting client state to {}", path.display());
            Ok(Arc::new(FileStorage::open(path)?))
        }
        None => {
            info!("Keeping client state in memory");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}
