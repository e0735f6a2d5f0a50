//! Repository configuration types

use crate::{
    FileSystemFilterRepository, FilterRepository, InMemoryFilterRepository, RepositoryError,
    RepositoryResult,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Repository source type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositorySource {
    /// Filters live only for the lifetime of the process
    #[default]
    Memory,
    /// One YAML file per filter under `base_path`
    FileSystem,
}

/// Repository configuration
///
/// # Examples
///
/// ```rust
/// use targeting_repository::RepositoryConfig;
///
/// let config = RepositoryConfig::file_system("data/filters");
/// assert!(config.validate().is_ok());
///
/// let config = RepositoryConfig::memory();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub source: RepositorySource,

    /// File system base path (required for FileSystem source)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
}

impl RepositoryConfig {
    /// Create a file system repository configuration
    pub fn file_system(path: impl Into<String>) -> Self {
        Self {
            source: RepositorySource::FileSystem,
            base_path: Some(path.into()),
        }
    }

    /// Create a memory repository configuration
    pub fn memory() -> Self {
        Self {
            source: RepositorySource::Memory,
            base_path: None,
        }
    }

    /// Validate the configuration
    ///
    /// Returns an error if required fields are missing for the selected source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.source {
            RepositorySource::FileSystem if self.base_path.is_none() => {
                Err(ConfigError::MissingField {
                    repository: self.source,
                    field: "base_path",
                })
            }
            _ => Ok(()),
        }
    }

    /// Build the configured repository
    pub async fn build(&self) -> RepositoryResult<Arc<dyn FilterRepository>> {
        self.validate()
            .map_err(|e| RepositoryError::Other(e.to_string()))?;

        match (&self.source, &self.base_path) {
            (RepositorySource::FileSystem, Some(path)) => {
                Ok(Arc::new(FileSystemFilterRepository::new(path).await?))
            }
            _ => Ok(Arc::new(InMemoryFilterRepository::new())),
        }
    }
}

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing for the selected source
    #[error("{repository:?} source requires {field} to be set")]
    MissingField {
        repository: RepositorySource,
        field: &'static str,
    },
}
