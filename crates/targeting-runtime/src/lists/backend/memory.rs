//! In-memory list backend
//!
//! Simple memory-based list storage for testing and development.

use super::ListBackend;
use crate::error::Result;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// In-memory list backend
///
/// Stores list data in memory using HashSets. Data is lost when the
/// process restarts.
pub struct MemoryBackend {
    /// Map of list_id -> set of identifiers
    lists: RwLock<HashMap<String, HashSet<String>>>,
}

impl MemoryBackend {
    /// Create a new memory backend
    pub fn new() -> Self {
        Self {
            lists: RwLock::new(HashMap::new()),
        }
    }

    /// Create a memory backend holding one pre-filled list
    pub fn with_values<I, S>(list_id: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: HashSet<String> = values.into_iter().map(Into::into).collect();
        let mut lists = HashMap::new();
        lists.insert(list_id.to_string(), set);
        Self {
            lists: RwLock::new(lists),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ListBackend for MemoryBackend {
    async fn contains(&self, list_id: &str, value: &str) -> Result<bool> {
        let lists = self.lists.read().await;

        Ok(lists
            .get(list_id)
            .map(|list| list.contains(value))
            .unwrap_or(false))
    }

    async fn add(&mut self, list_id: &str, value: String) -> Result<()> {
        let mut lists = self.lists.write().await;

        lists
            .entry(list_id.to_string())
            .or_insert_with(HashSet::new)
            .insert(value);

        Ok(())
    }

    async fn remove(&mut self, list_id: &str, value: &str) -> Result<()> {
        let mut lists = self.lists.write().await;

        if let Some(list) = lists.get_mut(list_id) {
            list.remove(value);
        }

        Ok(())
    }

    async fn get_all(&self, list_id: &str) -> Result<Vec<String>> {
        let lists = self.lists.read().await;

        Ok(lists
            .get(list_id)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default())
    }
}
