//! Read-only reference data for client UIs

use crate::model::{FieldType, LogicalOperator, Operator};
use serde::{Deserialize, Serialize};

/// A field type as presented to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTypeInfo {
    pub name: FieldType,
    pub display_name: String,
}

/// An operator as presented to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorInfo {
    pub name: Operator,
    pub symbol: String,
}

/// The closed vocabularies, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub field_types: Vec<FieldTypeInfo>,
    pub operators: Vec<OperatorInfo>,
    pub logical_operators: Vec<LogicalOperator>,
}

impl ReferenceData {
    pub fn current() -> Self {
        Self {
            field_types: FieldType::ALL
                .iter()
                .map(|field| FieldTypeInfo {
                    name: *field,
                    display_name: field.display_name().to_string(),
                })
                .collect(),
            operators: Operator::ALL
                .iter()
                .map(|op| OperatorInfo {
                    name: *op,
                    symbol: op.symbol().to_string(),
                })
                .collect(),
            logical_operators: LogicalOperator::ALL.to_vec(),
        }
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::current()
    }
}
