//! In-memory repository implementation

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use targeting_core::Filter;
use tokio::sync::RwLock;

use crate::{error::RepositoryError, models::IdSequence, traits::FilterRepository, RepositoryResult};

#[derive(Default)]
struct State {
    filters: BTreeMap<i64, Filter>,
    ids: IdSequence,
}

/// Repository holding filters in process memory
#[derive(Default)]
pub struct InMemoryFilterRepository {
    state: RwLock<State>,
}

impl InMemoryFilterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored filters
    pub async fn len(&self) -> usize {
        self.state.read().await.filters.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.filters.is_empty()
    }
}

#[async_trait]
impl FilterRepository for InMemoryFilterRepository {
    async fn exists_by_name(&self, name: &str) -> RepositoryResult<bool> {
        let state = self.state.read().await;
        Ok(state.filters.values().any(|f| f.name == name))
    }

    async fn exists_by_name_excluding(&self, name: &str, id: i64) -> RepositoryResult<bool> {
        let state = self.state.read().await;
        Ok(state
            .filters
            .values()
            .any(|f| f.name == name && f.id != Some(id)))
    }

    async fn load_by_id(&self, id: i64) -> RepositoryResult<Option<Filter>> {
        let state = self.state.read().await;
        Ok(state.filters.get(&id).cloned())
    }

    async fn save(&self, filter: Filter) -> RepositoryResult<Filter> {
        let mut state = self.state.write().await;

        let created = filter
            .id
            .and_then(|id| state.filters.get(&id))
            .and_then(|existing| existing.date_create);
        let stored = state.ids.stamp(filter, created, Utc::now());

        let id = stored
            .id
            .ok_or_else(|| RepositoryError::Other("Stored filter has no id".to_string()))?;
        state.filters.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        let mut state = self.state.write().await;
        state
            .filters
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound { id })
    }

    async fn list(&self) -> RepositoryResult<Vec<Filter>> {
        let state = self.state.read().await;
        Ok(state.filters.values().cloned().collect())
    }
}
