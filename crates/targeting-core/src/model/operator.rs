//! Operators for targeting conditions

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    // Equality
    /// Exact string equality (=)
    Equal,
    /// Exact string inequality (≠)
    NotEqual,

    // String operators, case-insensitive
    /// Substring
    Contains,
    /// Not a substring
    NotContains,
    /// Prefix
    StartsWith,
    /// Suffix
    EndsWith,

    // Ordering
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,

    // Membership
    /// Value is one of a listed set
    In,
    /// Value is none of a listed set
    NotIn,

    /// Full-string regex match
    Regex,

    // Presence
    /// Record has no value for the field
    IsNull,
    /// Record has a value for the field
    IsNotNull,
}

impl Operator {
    /// Every operator, in declaration order
    pub const ALL: [Operator; 15] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::Contains,
        Operator::NotContains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::GreaterThan,
        Operator::GreaterThanOrEqual,
        Operator::LessThan,
        Operator::LessThanOrEqual,
        Operator::In,
        Operator::NotIn,
        Operator::Regex,
        Operator::IsNull,
        Operator::IsNotNull,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "EQUAL",
            Operator::NotEqual => "NOT_EQUAL",
            Operator::Contains => "CONTAINS",
            Operator::NotContains => "NOT_CONTAINS",
            Operator::StartsWith => "STARTS_WITH",
            Operator::EndsWith => "ENDS_WITH",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            Operator::LessThan => "LESS_THAN",
            Operator::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            Operator::In => "IN",
            Operator::NotIn => "NOT_IN",
            Operator::Regex => "REGEX",
            Operator::IsNull => "IS_NULL",
            Operator::IsNotNull => "IS_NOT_NULL",
        }
    }

    /// Short symbol shown in client UIs
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "≠",
            Operator::Contains => "Co",
            Operator::NotContains => "!Co",
            Operator::StartsWith => "SW",
            Operator::EndsWith => "EW",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::In => "In",
            Operator::NotIn => "!In",
            Operator::Regex => "Rx",
            Operator::IsNull => "NULL",
            Operator::IsNotNull => "!NULL",
        }
    }

    /// Returns true if this is an ordering operator (>, >=, <, <=)
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Operator::GreaterThan
                | Operator::GreaterThanOrEqual
                | Operator::LessThan
                | Operator::LessThanOrEqual
        )
    }

    /// Returns true if this operator only checks for presence
    pub fn is_null_check(&self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }

    /// Returns true if a condition using this operator must carry a value
    pub fn requires_value(&self) -> bool {
        !self.is_null_check()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CoreError::UnknownOperator(s.to_string()))
    }
}

/// Operators joining an item's result to the accumulated result of the
/// items before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    /// Logical AND
    #[default]
    And,
    /// Logical OR
    Or,
}

impl LogicalOperator {
    /// Every logical operator, in declaration order
    pub const ALL: [LogicalOperator; 2] = [LogicalOperator::And, LogicalOperator::Or];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }

    /// Combine an accumulated result with the next item's result
    pub fn apply(&self, acc: bool, next: bool) -> bool {
        match self {
            LogicalOperator::And => acc && next,
            LogicalOperator::Or => acc || next,
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(LogicalOperator::And),
            "OR" => Ok(LogicalOperator::Or),
            _ => Err(CoreError::UnknownLogicalOperator(s.to_string())),
        }
    }
}
