//! List backend implementations
//!
//! Backends for storing and querying list data.

pub mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::Result;

/// Trait for list storage backends
#[async_trait::async_trait]
pub trait ListBackend: Send + Sync {
    /// Check if an identifier exists in the list
    async fn contains(&self, list_id: &str, value: &str) -> Result<bool>;

    /// Add an identifier to the list
    async fn add(&mut self, list_id: &str, value: String) -> Result<()>;

    /// Remove an identifier from the list
    async fn remove(&mut self, list_id: &str, value: &str) -> Result<()>;

    /// Get all identifiers in a list
    async fn get_all(&self, list_id: &str) -> Result<Vec<String>>;
}
