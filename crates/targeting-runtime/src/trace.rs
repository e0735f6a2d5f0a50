//! Evaluation tracing types for filter debugging
//!
//! These structures record what the evaluator computed for each condition
//! and group, in evaluation order.

use serde::{Deserialize, Serialize};
use targeting_core::{FieldType, LogicalOperator, Operator};

/// Trace of a single condition evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionTrace {
    /// Position within its list
    pub index: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,

    /// Configured value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,

    /// Record value (the identifier, for distribution-list conditions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,

    /// Operator that joined this result into the running value; `None` for the first item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_with: Option<LogicalOperator>,

    pub result: bool,
}

/// Trace of a group evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTrace {
    pub index: usize,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_operator: Option<LogicalOperator>,

    /// Folded result of the group's own conditions
    pub result: bool,

    pub conditions: Vec<ConditionTrace>,
}

/// Trace of a whole filter evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationTrace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_name: Option<String>,

    pub active: bool,

    /// Final verdict
    pub matched: bool,

    /// Folded root conditions; `None` when the list is empty or evaluation stopped earlier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions_result: Option<bool>,

    /// Folded group chain; `None` when there are no groups or evaluation stopped earlier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups_result: Option<bool>,

    pub conditions: Vec<ConditionTrace>,
    pub groups: Vec<GroupTrace>,
}

impl EvaluationTrace {
    /// Every condition trace, root level first, then each group's in order
    pub fn all_conditions(&self) -> impl Iterator<Item = &ConditionTrace> {
        self.conditions
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.conditions.iter()))
    }
}
