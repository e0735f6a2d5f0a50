//! Configuration types for FilterEngine

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use targeting_repository::RepositoryConfig;

/// Main engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where filters are stored
    pub repository: RepositoryConfig,

    /// Directory of distribution list configs (`*.yaml`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lists_dir: Option<PathBuf>,

    /// Log a full evaluation trace for every evaluation
    pub trace_evaluations: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables and config file
    ///
    /// Reads `.env` if present, then an optional `config/targeting.{yaml,toml,json}`
    /// and `TARGETING_*` variables (nested keys separated by `__`, e.g.
    /// `TARGETING_REPOSITORY__SOURCE=filesystem`).
    pub fn load() -> Result<Self> {
        Self::load_from("config/targeting")
    }

    /// Like [`load`](Self::load), with the config file at `path`
    ///
    /// A missing file is fine; a file that cannot be parsed is an error.
    pub fn load_from(path: &str) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(false))
            .add_source(
                ::config::Environment::with_prefix("TARGETING")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SdkError::Config(format!("Failed to load config: {}", e)))?;

        config
            .try_deserialize()
            .map_err(|e| SdkError::Config(format!("Failed to deserialize config: {}", e)))
    }

    /// Parse configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| SdkError::Config(format!("Invalid engine config: {}", e)))
    }

    /// Read configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("Failed to read {:?}: {}", path, e)))?;
        Self::from_yaml(&content)
    }

    /// Set repository configuration
    pub fn with_repository(mut self, repository: RepositoryConfig) -> Self {
        self.repository = repository;
        self
    }

    /// Set the list config directory
    pub fn with_lists_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lists_dir = Some(dir.into());
        self
    }

    /// Enable evaluation tracing
    pub fn enable_trace(mut self, enable: bool) -> Self {
        self.trace_evaluations = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use targeting_repository::RepositorySource;

    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();
        assert_eq!(config.repository.source, RepositorySource::Memory);
        assert!(config.lists_dir.is_none());
        assert!(!config.trace_evaluations);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
repository:
  source: filesystem
  base_path: data/filters
lists_dir: config/lists
trace_evaluations: true
"#;
        let config = EngineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.repository, RepositoryConfig::file_system("data/filters"));
        assert_eq!(config.lists_dir, Some(PathBuf::from("config/lists")));
        assert!(config.trace_evaluations);
    }

    #[test]
    fn test_from_yaml_partial_uses_defaults() {
        let config = EngineConfig::from_yaml("trace_evaluations: true").unwrap();
        assert_eq!(config.repository.source, RepositorySource::Memory);
        assert!(config.trace_evaluations);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_source() {
        let err = EngineConfig::from_yaml("repository:\n  source: postgres").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targeting.yaml");
        std::fs::write(
            &path,
            "repository:\n  source: filesystem\n  base_path: data/filters\n",
        )
        .unwrap();

        let config = EngineConfig::load_from(&path.to_string_lossy()).unwrap();
        assert_eq!(config.repository, RepositoryConfig::file_system("data/filters"));
    }

    #[test]
    fn test_load_from_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targeting.yaml");
        std::fs::write(&path, "repository: [source: filesystem\n").unwrap();

        let result = EngineConfig::load_from(&path.to_string_lossy());
        assert!(matches!(result, Err(SdkError::Config(_))));
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");

        let config = EngineConfig::load_from(&path.to_string_lossy()).unwrap();
        assert_eq!(config.repository.source, RepositorySource::Memory);
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::new()
            .with_repository(RepositoryConfig::file_system("filters"))
            .with_lists_dir("lists")
            .enable_trace(true);
        assert_eq!(config.repository.source, RepositorySource::FileSystem);
        assert_eq!(config.lists_dir, Some(PathBuf::from("lists")));
        assert!(config.trace_evaluations);
    }
}
