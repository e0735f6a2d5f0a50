//! SDK error types

use targeting_core::ValidationError;
use targeting_repository::RepositoryError;
use targeting_runtime::RuntimeError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Filter failed structural validation or duplicates an existing name
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Runtime error (list loading, list mutation)
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// No filter with the given id
    #[error("Filter not found: {0}")]
    FilterNotFound(i64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_conversion() {
        let error: SdkError = ValidationError::DuplicateName {
            name: "Only Ukraine Users".to_string(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "Validation error: Filter with name 'Only Ukraine Users' already exists"
        );
    }

    #[test]
    fn test_filter_not_found() {
        let error = SdkError::FilterNotFound(42);
        assert_eq!(error.to_string(), "Filter not found: 42");
    }

    #[test]
    fn test_config_error() {
        let error = SdkError::Config("bad source".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("bad source"));
    }

    #[test]
    fn test_repository_error_conversion() {
        let error: SdkError = RepositoryError::NotFound { id: 3 }.into();
        assert!(matches!(error, SdkError::Repository(_)));
        assert!(error.to_string().contains("Filter not found: 3"));
    }
}
