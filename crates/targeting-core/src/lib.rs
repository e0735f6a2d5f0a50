//! Targeting Core - Core types and definitions for targeting filters
//!
//! This crate provides the fundamental types used across the targeting crates:
//! - Closed vocabularies (field types, comparison and logical operators)
//! - The filter data model (conditions, groups, filters)
//! - Structural validation of filters
//! - Reference data served to client UIs
//! - Error types

pub mod error;
pub mod model;
pub mod reference;
pub mod validation;

// Re-export commonly used types
pub use error::CoreError;
pub use model::{Condition, FieldType, Filter, Group, LogicalOperator, Operator};
pub use reference::ReferenceData;
pub use validation::{ConditionLocation, FilterValidator, ValidationError};
