//! Targeting SDK
//!
//! High-level API for managing targeting filters and evaluating them
//! against user requests.

pub mod builder;
pub mod config;
pub mod error;
pub mod filter_engine;

// Re-export main types
pub use builder::FilterEngineBuilder;
pub use config::EngineConfig;
pub use error::{Result, SdkError};
pub use filter_engine::{EvaluationRequest, EvaluationResponse, FilterEngine, ValidationResult};

// Re-export commonly used types from dependencies
pub use targeting_core::{
    Condition, FieldType, Filter, Group, LogicalOperator, Operator, ReferenceData, ValidationError,
};
pub use targeting_repository::{FilterRepository, RepositoryConfig, RepositorySource};
pub use targeting_runtime::{
    EvaluationTrace, ListService, MemoryBackend, MembershipLookup, RecordLookup, UserRecord,
};
