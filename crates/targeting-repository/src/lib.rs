//! Repository abstraction layer for targeting filters
//!
//! This crate provides a unified interface for storing filters (with their
//! root conditions and groups) in different backends.
//!
//! # Features
//!
//! - **In-memory repository**: process-local storage for tests and embedding
//! - **File system repository**: one YAML file per filter on disk
//! - **Async API**: non-blocking I/O operations with Tokio
//!
//! # Quick Start
//!
//! ```no_run
//! use targeting_repository::{FilterRepository, RepositoryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryConfig::file_system("data/filters").build().await?;
//!
//!     for filter in repo.list_by_target(1).await? {
//!         println!("{:?}: {}", filter.id, filter.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod file_system;
pub mod memory;
pub mod models;
pub mod traits;

// Re-exports - Configuration
pub use config::{ConfigError, RepositoryConfig, RepositorySource};

// Re-exports - Error
pub use error::{RepositoryError, RepositoryResult};

// Re-exports - Repositories
pub use file_system::FileSystemFilterRepository;
pub use memory::InMemoryFilterRepository;
pub use models::IdSequence;
pub use traits::FilterRepository;
