//! Condition, group and filter definitions
//!
//! Field names on the wire follow the management API (camelCase,
//! `filterName`, `fieldValue`, ...). Field type, operator, target and group
//! operator are optional at the type level so incomplete input can still be
//! deserialized and then rejected by [`FilterValidator`](crate::FilterValidator).

use super::field::FieldType;
use super::operator::{LogicalOperator, Operator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One atomic test against a record field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Owning group, `None` for root-level conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,

    pub field_type: Option<FieldType>,

    pub operator: Option<Operator>,

    /// Literal compared against the record value
    #[serde(rename = "fieldValue", default)]
    pub value: Option<String>,

    /// How this result joins the accumulated result of the items before it.
    /// Ignored on the first item of a list.
    #[serde(default)]
    pub logical_operator: Option<LogicalOperator>,

    #[serde(default)]
    pub order_index: i32,
}

impl Condition {
    /// Create a condition with no joining operator
    pub fn new(field_type: FieldType, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            id: None,
            group_id: None,
            field_type: Some(field_type),
            operator: Some(operator),
            value: Some(value.into()),
            logical_operator: None,
            order_index: 0,
        }
    }

    /// Create a presence check (IS_NULL / IS_NOT_NULL), which carries no value
    pub fn presence(field_type: FieldType, operator: Operator) -> Self {
        Self {
            value: None,
            ..Self::new(field_type, operator, "")
        }
    }

    /// Set the joining operator
    pub fn with_logical_operator(mut self, op: LogicalOperator) -> Self {
        self.logical_operator = Some(op);
        self
    }

    /// Join with OR
    pub fn or(self) -> Self {
        self.with_logical_operator(LogicalOperator::Or)
    }

    /// Join with AND
    pub fn and(self) -> Self {
        self.with_logical_operator(LogicalOperator::And)
    }

    /// Set the position within its list
    pub fn with_order_index(mut self, index: i32) -> Self {
        self.order_index = index;
        self
    }
}

/// A named, independently folded list of conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "groupName", default)]
    pub name: String,

    /// How this group's result joins the groups before it.
    /// Ignored for the first group.
    #[serde(default)]
    pub logical_operator: Option<LogicalOperator>,

    #[serde(default)]
    pub order_index: i32,

    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl Group {
    /// Create an empty group
    pub fn new(name: impl Into<String>, logical_operator: LogicalOperator) -> Self {
        Self {
            id: None,
            name: name.into(),
            logical_operator: Some(logical_operator),
            order_index: 0,
            conditions: Vec::new(),
        }
    }

    /// Append a condition
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Set the position within the filter's group list
    pub fn with_order_index(mut self, index: i32) -> Self {
        self.order_index = index;
        self
    }
}

fn default_active() -> bool {
    true
}

/// A targeting filter: root conditions plus a chain of groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Marketing target this filter belongs to
    #[serde(rename = "marketingTargetId", default)]
    pub target_id: Option<i64>,

    #[serde(rename = "filterName", default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "isActive", default = "default_active")]
    pub active: bool,

    /// Root-level conditions
    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub groups: Vec<Group>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_create: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
}

impl Filter {
    /// Create an active filter with no conditions
    pub fn new(name: impl Into<String>, target_id: i64) -> Self {
        Self {
            id: None,
            target_id: Some(target_id),
            name: name.into(),
            description: None,
            active: true,
            conditions: Vec::new(),
            groups: Vec::new(),
            date_create: None,
            last_update: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a root-level condition
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Append a group
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Mark the filter inactive
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Sort root conditions, groups and group conditions by `order_index`
    /// (stable), then renumber every list 0..n.
    pub fn normalized(mut self) -> Self {
        self.conditions.sort_by_key(|c| c.order_index);
        self.groups.sort_by_key(|g| g.order_index);
        for group in &mut self.groups {
            group.conditions.sort_by_key(|c| c.order_index);
        }
        self.with_positions_from_order()
    }

    /// Renumber every list 0..n in its current order, and clear the group
    /// link on root conditions.
    pub fn with_positions_from_order(mut self) -> Self {
        for (i, condition) in self.conditions.iter_mut().enumerate() {
            condition.order_index = i as i32;
            condition.group_id = None;
        }
        for (i, group) in self.groups.iter_mut().enumerate() {
            group.order_index = i as i32;
            for (j, condition) in group.conditions.iter_mut().enumerate() {
                condition.order_index = j as i32;
                condition.group_id = group.id;
            }
        }
        self
    }
}
