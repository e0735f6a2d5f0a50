//! List service for managing lists

use super::backend::ListBackend;
use super::MembershipLookup;
use crate::error::{Result, RuntimeError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// List service that routes list lookups to their backends
pub struct ListService {
    /// Map of list_id to backend
    backends: Arc<RwLock<HashMap<String, Box<dyn ListBackend>>>>,
}

impl ListService {
    /// Create a list service with no lists configured
    pub fn new() -> Self {
        Self {
            backends: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new list service with multiple backends
    pub fn new_with_backends(backends: HashMap<String, Box<dyn ListBackend>>) -> Self {
        Self {
            backends: Arc::new(RwLock::new(backends)),
        }
    }

    /// Register (or replace) the backend serving a list
    pub async fn register(&self, list_id: impl Into<String>, backend: Box<dyn ListBackend>) {
        let mut backends = self.backends.write().await;
        backends.insert(list_id.into(), backend);
    }

    /// Check if an identifier exists in a list
    ///
    /// A list that is not configured is treated as empty.
    pub async fn contains(&self, list_id: &str, value: &str) -> Result<bool> {
        let backends = self.backends.read().await;

        match backends.get(list_id) {
            Some(backend) => backend.contains(list_id, value).await,
            None => {
                tracing::warn!("List '{}' not configured, treating as empty", list_id);
                Ok(false)
            }
        }
    }

    /// Add an identifier to a list
    pub async fn add(&self, list_id: &str, value: String) -> Result<()> {
        let mut backends = self.backends.write().await;

        let backend = backends
            .get_mut(list_id)
            .ok_or_else(|| RuntimeError::ListNotFound(list_id.to_string()))?;

        backend.add(list_id, value).await
    }

    /// Remove an identifier from a list
    pub async fn remove(&self, list_id: &str, value: &str) -> Result<()> {
        let mut backends = self.backends.write().await;

        let backend = backends
            .get_mut(list_id)
            .ok_or_else(|| RuntimeError::ListNotFound(list_id.to_string()))?;

        backend.remove(list_id, value).await
    }

    /// Get all identifiers in a list
    pub async fn get_all(&self, list_id: &str) -> Result<Vec<String>> {
        let backends = self.backends.read().await;

        let backend = backends
            .get(list_id)
            .ok_or_else(|| RuntimeError::ListNotFound(list_id.to_string()))?;

        backend.get_all(list_id).await
    }

    /// Get all configured list IDs
    pub async fn list_ids(&self) -> Vec<String> {
        let backends = self.backends.read().await;
        backends.keys().cloned().collect()
    }

    /// Check if a list is configured
    pub async fn has_list(&self, list_id: &str) -> bool {
        let backends = self.backends.read().await;
        backends.contains_key(list_id)
    }
}

impl Default for ListService {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ListService {
    fn clone(&self) -> Self {
        Self {
            backends: Arc::clone(&self.backends),
        }
    }
}

#[async_trait::async_trait]
impl MembershipLookup for ListService {
    async fn exists(&self, record_id: &str, list_id: &str) -> Result<bool> {
        self.contains(list_id, record_id).await
    }
}
