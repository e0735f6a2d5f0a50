//! File-based list backend

use super::ListBackend;
use crate::error::{Result, RuntimeError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};

/// File-based list backend
///
/// Loads identifiers from a text file (one per line). Blank lines and lines
/// starting with `#` are skipped. The file holds exactly one list, so the
/// `list_id` argument of the trait methods is ignored.
pub struct FileBackend {
    file_path: PathBuf,

    entries: Arc<RwLock<HashSet<String>>>,

    /// Periodic reload, aborted when the backend is dropped
    reload_task: Option<JoinHandle<()>>,
}

impl FileBackend {
    /// Create a new file backend
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            entries: Arc::new(RwLock::new(HashSet::new())),
            reload_task: None,
        }
    }

    /// Create a new file backend that re-reads the file periodically
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new_with_reload(file_path: PathBuf, reload_interval_secs: u64) -> Self {
        let mut backend = Self::new(file_path.clone());

        let entries = Arc::clone(&backend.entries);
        backend.reload_task = Some(tokio::spawn(async move {
            let mut interval_timer = interval(Duration::from_secs(reload_interval_secs.max(1)));
            loop {
                interval_timer.tick().await;
                match Self::load_from_file(&file_path).await {
                    Ok(loaded) => {
                        let mut entries_write = entries.write().await;
                        *entries_write = loaded;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to reload list file {:?}: {}", file_path, e);
                    }
                }
            }
        }));

        backend
    }

    async fn load_from_file(path: &Path) -> Result<HashSet<String>> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            RuntimeError::InvalidOperation(format!("Failed to read list file {:?}: {}", path, e))
        })?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }

    /// Load entries immediately (called during initialization)
    pub async fn load(&self) -> Result<()> {
        let loaded = Self::load_from_file(&self.file_path).await?;
        tracing::debug!("Loaded {} entries from {:?}", loaded.len(), self.file_path);
        let mut entries = self.entries.write().await;
        *entries = loaded;
        Ok(())
    }

    /// Get the number of entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if the list is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Drop for FileBackend {
    fn drop(&mut self) {
        if let Some(task) = self.reload_task.take() {
            task.abort();
        }
    }
}

#[async_trait::async_trait]
impl ListBackend for FileBackend {
    async fn contains(&self, _list_id: &str, value: &str) -> Result<bool> {
        let entries = self.entries.read().await;
        Ok(entries.contains(value))
    }

    async fn add(&mut self, _list_id: &str, _value: String) -> Result<()> {
        Err(RuntimeError::InvalidOperation(
            "File backend is read-only".to_string(),
        ))
    }

    async fn remove(&mut self, _list_id: &str, _value: &str) -> Result<()> {
        Err(RuntimeError::InvalidOperation(
            "File backend is read-only".to_string(),
        ))
    }

    async fn get_all(&self, _list_id: &str) -> Result<Vec<String>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().cloned().collect())
    }
}
