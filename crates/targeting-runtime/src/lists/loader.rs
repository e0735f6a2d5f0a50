//! List configuration loader

use super::backend::{FileBackend, ListBackend, MemoryBackend};
use super::config::{ListBackendType, ListConfig, ListsConfig};
use super::service::ListService;
use crate::error::{Result, RuntimeError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Builds list backends from YAML configuration files
pub struct ListLoader {
    /// Directory holding list configs; relative file paths resolve against it
    base_dir: PathBuf,
}

impl ListLoader {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Load every `*.yaml` / `*.yml` list config in the base directory
    ///
    /// Files that fail to parse are logged and skipped.
    pub async fn load_all(&self) -> Result<HashMap<String, Box<dyn ListBackend>>> {
        let mut backends = HashMap::new();

        if !self.base_dir.exists() {
            tracing::warn!("Lists directory does not exist: {:?}", self.base_dir);
            return Ok(backends);
        }

        let mut entries = fs::read_dir(&self.base_dir).await.map_err(|e| {
            RuntimeError::ConfigError(format!("Failed to read lists directory: {}", e))
        })?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            RuntimeError::ConfigError(format!("Failed to read directory entry: {}", e))
        })? {
            let path = entry.path();
            let is_yaml = matches!(
                path.extension().and_then(|s| s.to_str()),
                Some("yaml") | Some("yml")
            );
            if !is_yaml {
                continue;
            }

            match self.load_from_file(&path).await {
                Ok(file_backends) => backends.extend(file_backends),
                Err(e) => {
                    tracing::error!("Failed to load list config from {:?}: {}", path, e);
                }
            }
        }

        tracing::info!("Loaded {} list backends", backends.len());
        Ok(backends)
    }

    /// Load list configurations from a single file
    ///
    /// Accepts either a `lists:` document or a single list config.
    pub async fn load_from_file(&self, path: &Path) -> Result<HashMap<String, Box<dyn ListBackend>>> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            RuntimeError::ConfigError(format!("Failed to read {:?}: {}", path, e))
        })?;

        if let Ok(lists_config) = serde_yaml::from_str::<ListsConfig>(&content) {
            return Ok(self.create_backends(lists_config).await);
        }

        let config = serde_yaml::from_str::<ListConfig>(&content).map_err(|e| {
            RuntimeError::ConfigError(format!("Failed to parse list config from {:?}: {}", path, e))
        })?;
        let (id, backend) = self.create_backend(config).await?;
        Ok(HashMap::from([(id, backend)]))
    }

    /// Create backends for every list in a parsed config, skipping failures
    pub async fn create_backends(&self, config: ListsConfig) -> HashMap<String, Box<dyn ListBackend>> {
        let mut backends = HashMap::new();
        for list in config.lists {
            match self.create_backend(list).await {
                Ok((id, backend)) => {
                    backends.insert(id, backend);
                }
                Err(e) => {
                    tracing::error!("Failed to create list backend: {}", e);
                }
            }
        }
        backends
    }

    /// Load all configs and wrap the backends in a [`ListService`]
    pub async fn build_service(&self) -> Result<ListService> {
        Ok(ListService::new_with_backends(self.load_all().await?))
    }

    async fn create_backend(&self, config: ListConfig) -> Result<(String, Box<dyn ListBackend>)> {
        let list_id = config.id;

        let backend: Box<dyn ListBackend> = match config.backend {
            ListBackendType::Memory => Box::new(MemoryBackend::with_values(
                &list_id,
                config.initial_values,
            )),

            ListBackendType::File => {
                let file_path = config.path.ok_or_else(|| {
                    RuntimeError::ConfigError(format!(
                        "File backend for list '{}' requires 'path' field",
                        list_id
                    ))
                })?;

                let full_path = if Path::new(&file_path).is_absolute() {
                    PathBuf::from(file_path)
                } else {
                    self.base_dir.join(file_path)
                };

                let backend = match config.reload_interval {
                    Some(secs) => FileBackend::new_with_reload(full_path, secs),
                    None => FileBackend::new(full_path),
                };
                backend.load().await?;
                Box::new(backend)
            }
        };

        Ok((list_id, backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_memory_list() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = r#"
lists:
  - id: "17"
    description: "Beta testers"
    backend: memory
    initial_values:
      - "3586067540"
"#;
        fs::write(temp_dir.path().join("lists.yaml"), yaml).await.unwrap();
        fs::write(temp_dir.path().join("README.md"), "ignored").await.unwrap();

        let loader = ListLoader::new(temp_dir.path());
        let backends = loader.load_all().await.unwrap();

        assert_eq!(backends.len(), 1);
        let backend = backends.get("17").unwrap();
        assert!(backend.contains("17", "3586067540").await.unwrap());
    }

    #[tokio::test]
    async fn test_load_file_list_relative_to_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("data")).await.unwrap();
        fs::write(temp_dir.path().join("data/18.txt"), "item1\nitem2\n")
            .await
            .unwrap();

        let yaml = r#"
id: "18"
backend: file
path: "data/18.txt"
"#;
        fs::write(temp_dir.path().join("file_list.yml"), yaml).await.unwrap();

        let service = ListLoader::new(temp_dir.path()).build_service().await.unwrap();
        assert!(service.contains("18", "item1").await.unwrap());
        assert!(!service.contains("18", "item3").await.unwrap());
    }

    #[tokio::test]
    async fn test_file_list_without_path_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = r#"
lists:
  - id: broken
    backend: file
  - id: ok
    initial_values: ["x"]
"#;
        fs::write(temp_dir.path().join("lists.yaml"), yaml).await.unwrap();

        let backends = ListLoader::new(temp_dir.path()).load_all().await.unwrap();
        assert!(backends.contains_key("ok"));
        assert!(!backends.contains_key("broken"));
    }

    #[tokio::test]
    async fn test_missing_directory_yields_no_lists() {
        let loader = ListLoader::new("/nonexistent/lists");
        assert!(loader.load_all().await.unwrap().is_empty());
    }
}
