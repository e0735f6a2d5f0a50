//! Core trait definition for filter persistence
//!
//! ```no_run
//! use targeting_core::{Condition, FieldType, Filter, Operator};
//! use targeting_repository::{FilterRepository, InMemoryFilterRepository};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = InMemoryFilterRepository::new();
//!
//! let filter = Filter::new("Only Ukraine Users", 1)
//!     .with_condition(Condition::new(FieldType::Country, Operator::Equal, "UA"));
//! let stored = repo.save(filter).await?;
//!
//! assert!(repo.exists_by_name("Only Ukraine Users").await?);
//! let loaded = repo.load_by_id(stored.id.unwrap()).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use targeting_core::Filter;

use crate::RepositoryResult;

/// Storage for filters and their conditions and groups
///
/// All implementations must be `Send + Sync` for use across async tasks.
#[async_trait]
pub trait FilterRepository: Send + Sync {
    /// Whether any stored filter has exactly this name
    async fn exists_by_name(&self, name: &str) -> RepositoryResult<bool>;

    /// Whether a stored filter other than `id` has exactly this name
    async fn exists_by_name_excluding(&self, name: &str, id: i64) -> RepositoryResult<bool>;

    /// Load a filter by id
    async fn load_by_id(&self, id: i64) -> RepositoryResult<Option<Filter>>;

    /// Store a filter and return it as stored
    ///
    /// Assigns an id when absent, stamps `date_create` on first save and
    /// `last_update` on every save, assigns ids to new groups and
    /// conditions, and renumbers positions from list order.
    async fn save(&self, filter: Filter) -> RepositoryResult<Filter>;

    /// Delete a filter; `NotFound` if there is none
    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()>;

    /// All filters, ordered by id
    async fn list(&self) -> RepositoryResult<Vec<Filter>>;

    /// Filters of one marketing target, ordered by id
    async fn list_by_target(&self, target_id: i64) -> RepositoryResult<Vec<Filter>> {
        let mut filters = self.list().await?;
        filters.retain(|f| f.target_id == Some(target_id));
        Ok(filters)
    }
}
