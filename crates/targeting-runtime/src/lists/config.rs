//! List configuration structures

use serde::{Deserialize, Serialize};

/// Distribution list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// List ID, as referenced by a `DISTRIBUTION_GROUPS_FILE` condition value
    pub id: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub backend: ListBackendType,

    /// Path to the identifier file (when backend = file)
    #[serde(default)]
    pub path: Option<String>,

    /// Reload interval in seconds (when backend = file)
    #[serde(default)]
    pub reload_interval: Option<u64>,

    /// Members to seed (when backend = memory)
    #[serde(default)]
    pub initial_values: Vec<String>,
}

/// Backend type
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListBackendType {
    #[default]
    Memory,
    File,
}

/// Container for multiple list configurations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListsConfig {
    pub lists: Vec<ListConfig>,
}
