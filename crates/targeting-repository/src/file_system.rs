//! File system based repository implementation
//!
//! Each filter is stored as `filter_<id>.yaml` directly under the root
//! directory. Ids continue from the highest ones found when the repository
//! is opened.

use async_trait::async_trait;
use chrono::Utc;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use targeting_core::Filter;
use tokio::fs;
use tokio::sync::Mutex;

use crate::{error::RepositoryError, models::IdSequence, traits::FilterRepository, RepositoryResult};

const FILE_PREFIX: &str = "filter_";
const FILE_EXTENSION: &str = "yaml";

/// File system based repository
pub struct FileSystemFilterRepository {
    /// Root path of the repository
    root_path: PathBuf,
    /// Id counters; the lock also serializes writes
    ids: Mutex<IdSequence>,
}

impl FileSystemFilterRepository {
    /// Open a repository rooted at `root_path`, creating the directory if needed
    ///
    /// # Example
    /// ```no_run
    /// use targeting_repository::FileSystemFilterRepository;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let repo = FileSystemFilterRepository::new("data/filters").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new<P: AsRef<Path>>(root_path: P) -> RepositoryResult<Self> {
        let path = root_path.as_ref();

        if path.exists() && !path.is_dir() {
            return Err(RepositoryError::InvalidPath {
                path: path.to_path_buf(),
            });
        }
        fs::create_dir_all(path).await?;

        let abs_path = path
            .absolutize()
            .map_err(|e| RepositoryError::Other(format!("Failed to absolutize path: {}", e)))?
            .to_path_buf();

        let repo = Self {
            root_path: abs_path,
            ids: Mutex::new(IdSequence::new()),
        };

        let existing = repo.read_all().await?;
        {
            let mut ids = repo.ids.lock().await;
            for filter in &existing {
                ids.observe(filter);
            }
        }
        tracing::info!(
            "Opened filter repository at {:?} with {} filters",
            repo.root_path,
            existing.len()
        );

        Ok(repo)
    }

    /// Root directory of the repository
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn path_for(&self, id: i64) -> PathBuf {
        self.root_path
            .join(format!("{}{}.{}", FILE_PREFIX, id, FILE_EXTENSION))
    }

    fn is_filter_file(path: &Path) -> bool {
        path.extension().and_then(|s| s.to_str()) == Some(FILE_EXTENSION)
            && path
                .file_name()
                .and_then(|s| s.to_str())
                .is_some_and(|name| name.starts_with(FILE_PREFIX))
    }

    async fn read_file(path: &Path) -> RepositoryResult<Filter> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Every parseable filter file, ordered by id
    async fn read_all(&self) -> RepositoryResult<Vec<Filter>> {
        let mut filters = Vec::new();
        let mut entries = fs::read_dir(&self.root_path).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !Self::is_filter_file(&path) {
                continue;
            }
            match Self::read_file(&path).await {
                Ok(filter) => filters.push(filter),
                Err(e) => {
                    tracing::warn!("Skipping unreadable filter file {:?}: {}", path, e);
                }
            }
        }

        filters.sort_by_key(|f| f.id);
        Ok(filters)
    }

    async fn write_file(&self, id: i64, filter: &Filter) -> RepositoryResult<()> {
        let content = serde_yaml::to_string(filter)?;
        let path = self.path_for(id);
        let tmp_path = path.with_extension("yaml.tmp");

        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl FilterRepository for FileSystemFilterRepository {
    async fn exists_by_name(&self, name: &str) -> RepositoryResult<bool> {
        Ok(self.read_all().await?.iter().any(|f| f.name == name))
    }

    async fn exists_by_name_excluding(&self, name: &str, id: i64) -> RepositoryResult<bool> {
        Ok(self
            .read_all()
            .await?
            .iter()
            .any(|f| f.name == name && f.id != Some(id)))
    }

    async fn load_by_id(&self, id: i64) -> RepositoryResult<Option<Filter>> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        Self::read_file(&path).await.map(Some)
    }

    async fn save(&self, filter: Filter) -> RepositoryResult<Filter> {
        let mut ids = self.ids.lock().await;

        let created = match filter.id {
            Some(id) => self.load_by_id(id).await?.and_then(|f| f.date_create),
            None => None,
        };
        let stored = ids.stamp(filter, created, Utc::now());

        let id = stored
            .id
            .ok_or_else(|| RepositoryError::Other("Stored filter has no id".to_string()))?;
        self.write_file(id, &stored).await?;
        tracing::debug!("Saved filter {} to {:?}", id, self.path_for(id));

        Ok(stored)
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        let _guard = self.ids.lock().await;

        let path = self.path_for(id);
        if !path.exists() {
            return Err(RepositoryError::NotFound { id });
        }
        fs::remove_file(&path).await?;
        tracing::debug!("Deleted filter {}", id);
        Ok(())
    }

    async fn list(&self) -> RepositoryResult<Vec<Filter>> {
        self.read_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_filter_file() {
        assert!(FileSystemFilterRepository::is_filter_file(Path::new("/r/filter_3.yaml")));
        assert!(!FileSystemFilterRepository::is_filter_file(Path::new("/r/filter_3.yaml.tmp")));
        assert!(!FileSystemFilterRepository::is_filter_file(Path::new("/r/lists.yaml")));
    }

    #[tokio::test]
    async fn test_path_for() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileSystemFilterRepository::new(temp_dir.path()).await.unwrap();
        assert!(repo.path_for(12).ends_with("filter_12.yaml"));
    }

    #[tokio::test]
    async fn test_rejects_file_as_root() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("not_a_dir");
        fs::write(&file, "x").await.unwrap();

        assert!(matches!(
            FileSystemFilterRepository::new(&file).await,
            Err(RepositoryError::InvalidPath { .. })
        ));
    }
}
