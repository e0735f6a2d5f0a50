//! Structural validation of filters
//!
//! A filter is checked once, before it is persisted or evaluated. The first
//! violation found is returned; its message names the offending item by
//! position (root-level index, or group name plus index).

use crate::model::{Condition, FieldType, Filter, Group, Operator};
use std::fmt;
use thiserror::Error;

/// Where a condition sits inside a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionLocation {
    /// Root-level condition list
    Root,
    /// Condition list of the named group
    Group(String),
}

impl fmt::Display for ConditionLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionLocation::Root => f.write_str("root level"),
            ConditionLocation::Group(name) => write!(f, "group '{}'", name),
        }
    }
}

/// Structural violation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Filter name is required")]
    MissingName,

    #[error("Marketing target ID is required")]
    MissingTarget,

    #[error("Filter must have at least one condition or group")]
    Empty,

    #[error("Field type is required for condition {index} at {location}")]
    MissingFieldType {
        index: usize,
        location: ConditionLocation,
    },

    #[error("Operator is required for condition {index} at {location}")]
    MissingOperator {
        index: usize,
        location: ConditionLocation,
    },

    #[error("Field value is required for condition {index} at {location} with operator {operator}")]
    MissingValue {
        index: usize,
        location: ConditionLocation,
        operator: Operator,
    },

    #[error("DISTRIBUTION_GROUPS_FILE supports only IN, NOT_IN, EQUAL, NOT_EQUAL operators (condition {index} at {location} uses {operator})")]
    UnsupportedMembershipOperator {
        index: usize,
        location: ConditionLocation,
        operator: Operator,
    },

    #[error("Invalid version format for condition {index} at {location}: {value}")]
    InvalidVersion {
        index: usize,
        location: ConditionLocation,
        value: String,
    },

    #[error("Group name is required for group {index}")]
    MissingGroupName { index: usize },

    #[error("Logical operator is required for group {index} ({name})")]
    MissingGroupOperator { index: usize, name: String },

    #[error("Group {index} ({name}) must have at least one condition")]
    EmptyGroup { index: usize, name: String },

    #[error("Filter with name '{name}' already exists")]
    DuplicateName { name: String },
}

/// Validator for filter structure
pub struct FilterValidator;

impl FilterValidator {
    /// Validate a whole filter, stopping at the first violation
    pub fn validate(filter: &Filter) -> Result<(), ValidationError> {
        if filter.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }

        if filter.target_id.is_none() {
            return Err(ValidationError::MissingTarget);
        }

        if filter.conditions.is_empty() && filter.groups.is_empty() {
            return Err(ValidationError::Empty);
        }

        Self::validate_conditions(&filter.conditions, &ConditionLocation::Root)?;

        for (index, group) in filter.groups.iter().enumerate() {
            Self::validate_group(index, group)?;
        }

        Ok(())
    }

    /// Validate one group and its conditions
    pub fn validate_group(index: usize, group: &Group) -> Result<(), ValidationError> {
        if group.name.trim().is_empty() {
            return Err(ValidationError::MissingGroupName { index });
        }

        if group.logical_operator.is_none() {
            return Err(ValidationError::MissingGroupOperator {
                index,
                name: group.name.clone(),
            });
        }

        if group.conditions.is_empty() {
            return Err(ValidationError::EmptyGroup {
                index,
                name: group.name.clone(),
            });
        }

        Self::validate_conditions(&group.conditions, &ConditionLocation::Group(group.name.clone()))
    }

    fn validate_conditions(
        conditions: &[Condition],
        location: &ConditionLocation,
    ) -> Result<(), ValidationError> {
        conditions
            .iter()
            .enumerate()
            .try_for_each(|(index, condition)| Self::validate_condition(index, condition, location))
    }

    /// Validate a single condition at the given position
    pub fn validate_condition(
        index: usize,
        condition: &Condition,
        location: &ConditionLocation,
    ) -> Result<(), ValidationError> {
        let field_type = condition.field_type.ok_or_else(|| ValidationError::MissingFieldType {
            index,
            location: location.clone(),
        })?;

        let operator = condition.operator.ok_or_else(|| ValidationError::MissingOperator {
            index,
            location: location.clone(),
        })?;

        let value = condition.value.as_deref().filter(|v| !v.trim().is_empty());

        if operator.requires_value() && value.is_none() {
            return Err(ValidationError::MissingValue {
                index,
                location: location.clone(),
                operator,
            });
        }

        if field_type.is_membership()
            && !matches!(
                operator,
                Operator::In | Operator::NotIn | Operator::Equal | Operator::NotEqual
            )
        {
            return Err(ValidationError::UnsupportedMembershipOperator {
                index,
                location: location.clone(),
                operator,
            });
        }

        if field_type == FieldType::ClientVersion
            && operator.is_ordering()
            && !value.is_some_and(is_valid_version)
        {
            return Err(ValidationError::InvalidVersion {
                index,
                location: location.clone(),
                value: condition.value.clone().unwrap_or_default(),
            });
        }

        Ok(())
    }
}

/// Version grammar: `digits('.'digits)*`, ASCII digits only
pub fn is_valid_version(version: &str) -> bool {
    !version.is_empty()
        && version
            .split('.')
            .all(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LogicalOperator;

    fn valid_filter() -> Filter {
        Filter::new("Only Ukraine Users", 1)
            .with_condition(Condition::new(FieldType::Country, Operator::Equal, "UA"))
    }

    #[test]
    fn test_valid_filter_passes() {
        assert_eq!(FilterValidator::validate(&valid_filter()), Ok(()));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut filter = valid_filter();
        filter.name = "   ".to_string();
        assert_eq!(FilterValidator::validate(&filter), Err(ValidationError::MissingName));
    }

    #[test]
    fn test_missing_target_rejected() {
        let mut filter = valid_filter();
        filter.target_id = None;
        assert_eq!(FilterValidator::validate(&filter), Err(ValidationError::MissingTarget));
    }

    #[test]
    fn test_empty_filter_rejected() {
        let filter = Filter::new("empty", 1);
        assert_eq!(FilterValidator::validate(&filter), Err(ValidationError::Empty));
    }

    #[test]
    fn test_missing_value_rejected_unless_null_check() {
        let mut condition = Condition::new(FieldType::Browser, Operator::Equal, " ");
        let filter = Filter::new("f", 1).with_condition(condition.clone());
        let err = FilterValidator::validate(&filter).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Field value is required for condition 0 at root level with operator EQUAL"
        );

        condition.operator = Some(Operator::IsNull);
        condition.value = None;
        let filter = Filter::new("f", 1).with_condition(condition);
        assert!(FilterValidator::validate(&filter).is_ok());
    }

    #[test]
    fn test_missing_field_type_reports_group_position() {
        let mut condition = Condition::new(FieldType::Country, Operator::Equal, "UA");
        condition.field_type = None;
        let filter = Filter::new("f", 1).with_group(
            Group::new("Countries", LogicalOperator::And)
                .with_condition(Condition::new(FieldType::Country, Operator::Equal, "RU"))
                .with_condition(condition),
        );

        let err = FilterValidator::validate(&filter).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Field type is required for condition 1 at group 'Countries'"
        );
    }

    #[test]
    fn test_membership_field_rejects_ordering_operator() {
        let filter = Filter::new("f", 1).with_condition(Condition::new(
            FieldType::DistributionGroupsFile,
            Operator::GreaterThan,
            "17",
        ));
        assert!(matches!(
            FilterValidator::validate(&filter),
            Err(ValidationError::UnsupportedMembershipOperator { index: 0, .. })
        ));
    }

    #[test]
    fn test_membership_field_accepts_equality_and_in() {
        for op in [Operator::In, Operator::NotIn, Operator::Equal, Operator::NotEqual] {
            let filter = Filter::new("f", 1)
                .with_condition(Condition::new(FieldType::DistributionGroupsFile, op, "17"));
            assert!(FilterValidator::validate(&filter).is_ok(), "{:?} should pass", op);
        }
    }

    #[test]
    fn test_client_version_ordering_requires_version_grammar() {
        let bad = Filter::new("f", 1).with_condition(Condition::new(
            FieldType::ClientVersion,
            Operator::GreaterThan,
            "2.x",
        ));
        assert!(matches!(
            FilterValidator::validate(&bad),
            Err(ValidationError::InvalidVersion { .. })
        ));

        let good = Filter::new("f", 1).with_condition(Condition::new(
            FieldType::ClientVersion,
            Operator::GreaterThan,
            "2.0.0",
        ));
        assert!(FilterValidator::validate(&good).is_ok());

        // Equality is not subject to the version grammar
        let equal = Filter::new("f", 1).with_condition(Condition::new(
            FieldType::ClientVersion,
            Operator::Equal,
            "beta",
        ));
        assert!(FilterValidator::validate(&equal).is_ok());
    }

    #[test]
    fn test_group_rules() {
        let unnamed = Filter::new("f", 1).with_group(
            Group::new("", LogicalOperator::And)
                .with_condition(Condition::new(FieldType::Country, Operator::Equal, "UA")),
        );
        assert_eq!(
            FilterValidator::validate(&unnamed),
            Err(ValidationError::MissingGroupName { index: 0 })
        );

        let mut no_op = Group::new("g", LogicalOperator::And)
            .with_condition(Condition::new(FieldType::Country, Operator::Equal, "UA"));
        no_op.logical_operator = None;
        let filter = Filter::new("f", 1).with_group(no_op);
        assert!(matches!(
            FilterValidator::validate(&filter),
            Err(ValidationError::MissingGroupOperator { index: 0, .. })
        ));

        let empty = Filter::new("f", 1)
            .with_condition(Condition::new(FieldType::Country, Operator::Equal, "UA"))
            .with_group(Group::new("Empty", LogicalOperator::Or));
        assert_eq!(
            FilterValidator::validate(&empty).unwrap_err().to_string(),
            "Group 0 (Empty) must have at least one condition"
        );
    }

    #[test]
    fn test_is_valid_version() {
        assert!(is_valid_version("1"));
        assert!(is_valid_version("10.15.7"));
        assert!(!is_valid_version(""));
        assert!(!is_valid_version("1."));
        assert!(!is_valid_version(".1"));
        assert!(!is_valid_version("1..2"));
        assert!(!is_valid_version("v1.2"));
        assert!(!is_valid_version("1.2 "));
    }
}
