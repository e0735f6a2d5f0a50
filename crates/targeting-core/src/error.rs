//! Error types for Targeting Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown logical operator: {0}")]
    UnknownLogicalOperator(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
