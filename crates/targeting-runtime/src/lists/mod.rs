//! Distribution list management
//!
//! Distribution lists are uploaded sets of record identifiers. A
//! `DISTRIBUTION_GROUPS_FILE` condition asks whether the record's identifier
//! is a member of the list named by the condition value.

pub mod backend;
pub mod config;
pub mod loader;
pub mod service;


pub use backend::{FileBackend, ListBackend, MemoryBackend};
pub use config::{ListBackendType, ListConfig, ListsConfig};
pub use loader::ListLoader;
pub use service::ListService;

use crate::error::Result;

/// Membership lookup capability consumed by the evaluator
#[async_trait::async_trait]
pub trait MembershipLookup: Send + Sync {
    /// Check whether `record_id` is a member of list `list_id`
    async fn exists(&self, record_id: &str, list_id: &str) -> Result<bool>;
}
