//! FilterEngine - Main API for managing and evaluating targeting filters
//!
//! The module is organized into:
//! - `types`: Request/Response types (EvaluationRequest, EvaluationResponse, ValidationResult)
//! - `engine`: Core FilterEngine implementation
//! - `tests`: Unit tests (test-only)

mod engine;
mod types;

// Re-export public types
pub use engine::FilterEngine;
pub use types::{EvaluationRequest, EvaluationResponse, ValidationResult};
