//! Targeting Runtime - Evaluation engine for targeting filters
//!
//! This crate evaluates a [`Filter`](targeting_core::Filter) against a
//! record and resolves distribution-list membership through pluggable
//! list backends.

pub mod error;
pub mod evaluator;
pub mod lists;
pub mod record;
pub mod trace;

// Re-export main types
pub use error::{Result, RuntimeError};
pub use evaluator::FilterEvaluator;
pub use lists::{
    FileBackend, ListBackend, ListLoader, ListService, ListsConfig, MemoryBackend,
    MembershipLookup,
};
pub use record::{RecordLookup, UserRecord};
pub use trace::{ConditionTrace, EvaluationTrace, GroupTrace};
