//! Request/Response types for FilterEngine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use targeting_core::{FieldType, Filter, LogicalOperator, Operator, ReferenceData, ValidationError};
use targeting_runtime::UserRecord;

/// Evaluation request: an inline filter or the id of a stored one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    /// Inline filter; takes precedence over `filter_id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_id: Option<i64>,

    #[serde(default)]
    pub user_request: UserRecord,
}

impl EvaluationRequest {
    /// Request evaluation of an inline filter
    pub fn inline(filter: Filter, user_request: UserRecord) -> Self {
        Self {
            filter: Some(filter),
            filter_id: None,
            user_request,
        }
    }

    /// Request evaluation of a stored filter
    pub fn by_id(filter_id: i64, user_request: UserRecord) -> Self {
        Self {
            filter: None,
            filter_id: Some(filter_id),
            user_request,
        }
    }
}

/// Evaluation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    pub matched: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_id: Option<i64>,

    pub evaluated_at: DateTime<Utc>,
}

/// Outcome of structural validation, with the vocabularies for client UIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub field_types: Vec<FieldType>,
    pub operators: Vec<Operator>,
    pub logical_operators: Vec<LogicalOperator>,
}

impl ValidationResult {
    pub(crate) fn from_outcome(outcome: Result<(), ValidationError>) -> Self {
        let reference = ReferenceData::current();
        Self {
            valid: outcome.is_ok(),
            errors: outcome.err().map(|e| e.to_string()).into_iter().collect(),
            field_types: reference.field_types.into_iter().map(|f| f.name).collect(),
            operators: reference.operators.into_iter().map(|o| o.name).collect(),
            logical_operators: reference.logical_operators,
        }
    }
}
