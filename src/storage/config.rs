use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for persisted client state
#[derive(Debug, DisplaySimple, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// JSON file holding the persisted keys; `None` keeps everything in memory
    pub path: Option<PathBuf>,
}
