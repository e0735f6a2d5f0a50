//! Filter evaluator
//!
//! Folds a filter's root conditions and its group chain into one verdict.
//! Within a list, each item joins the running result with its own logical
//! operator, or with the last explicit operator seen earlier in the same
//! list when it has none. Evaluation never fails: anomalies such as a bad
//! regex or a failed membership lookup make that condition `false`.

mod compare;

use crate::lists::{ListService, MembershipLookup};
use crate::record::RecordLookup;
use crate::trace::{ConditionTrace, EvaluationTrace, GroupTrace};
use std::sync::Arc;
use targeting_core::{Condition, FieldType, Filter, Group, LogicalOperator, Operator};

use compare::execute_compare;

/// Evaluates filters against records
#[derive(Clone)]
pub struct FilterEvaluator {
    membership: Arc<dyn MembershipLookup>,
}

impl FilterEvaluator {
    /// Create an evaluator resolving distribution lists through `membership`
    pub fn new(membership: Arc<dyn MembershipLookup>) -> Self {
        Self { membership }
    }

    /// Evaluate a filter; inactive filters never match
    pub async fn evaluate<R>(&self, filter: &Filter, record: &R) -> bool
    where
        R: RecordLookup + ?Sized,
    {
        self.run(filter, record, None).await
    }

    /// Evaluate a filter that may be absent; an absent filter never matches
    pub async fn evaluate_optional<R>(&self, filter: Option<&Filter>, record: &R) -> bool
    where
        R: RecordLookup + ?Sized,
    {
        match filter {
            Some(filter) => self.evaluate(filter, record).await,
            None => false,
        }
    }

    /// Evaluate a filter and record every condition and group result
    pub async fn evaluate_with_trace<R>(&self, filter: &Filter, record: &R) -> EvaluationTrace
    where
        R: RecordLookup + ?Sized,
    {
        let mut trace = EvaluationTrace {
            filter_id: filter.id,
            filter_name: Some(filter.name.clone()),
            active: filter.active,
            ..Default::default()
        };
        let matched = self.run(filter, record, Some(&mut trace)).await;
        trace.matched = matched;
        trace
    }

    /// Fold an ordered condition list; an empty list is `true`
    pub async fn fold_conditions<R>(&self, conditions: &[Condition], record: &R) -> bool
    where
        R: RecordLookup + ?Sized,
    {
        self.fold_conditions_traced(conditions, record, None).await
    }

    /// Fold an ordered group chain; an empty chain is `true`
    pub async fn fold_groups<R>(&self, groups: &[Group], record: &R) -> bool
    where
        R: RecordLookup + ?Sized,
    {
        self.fold_groups_traced(groups, record, None).await
    }

    /// Evaluate a single condition
    pub async fn evaluate_condition<R>(&self, condition: &Condition, record: &R) -> bool
    where
        R: RecordLookup + ?Sized,
    {
        self.check_condition(condition, record).await.0
    }

    async fn run<R>(&self, filter: &Filter, record: &R, mut trace: Option<&mut EvaluationTrace>) -> bool
    where
        R: RecordLookup + ?Sized,
    {
        if !filter.active {
            tracing::debug!("Filter '{}' is inactive, not matched", filter.name);
            return false;
        }

        if !filter.conditions.is_empty() {
            let sink = trace.as_deref_mut().map(|t| &mut t.conditions);
            let result = self.fold_conditions_traced(&filter.conditions, record, sink).await;
            if let Some(t) = trace.as_deref_mut() {
                t.conditions_result = Some(result);
            }
            if !result {
                tracing::debug!("Filter '{}' root conditions not matched", filter.name);
                return false;
            }
        }

        if !filter.groups.is_empty() {
            let sink = trace.as_deref_mut().map(|t| &mut t.groups);
            let result = self.fold_groups_traced(&filter.groups, record, sink).await;
            if let Some(t) = trace.as_deref_mut() {
                t.groups_result = Some(result);
            }
            if !result {
                tracing::debug!("Filter '{}' groups not matched", filter.name);
                return false;
            }
        }

        tracing::debug!("Filter '{}' matched", filter.name);
        true
    }

    async fn fold_conditions_traced<R>(
        &self,
        conditions: &[Condition],
        record: &R,
        mut trace: Option<&mut Vec<ConditionTrace>>,
    ) -> bool
    where
        R: RecordLookup + ?Sized,
    {
        let Some((first, rest)) = conditions.split_first() else {
            return true;
        };

        let (mut running, actual) = self.check_condition(first, record).await;
        if let Some(sink) = trace.as_deref_mut() {
            sink.push(condition_trace(0, first, actual, None, running));
        }

        let mut carry = first.logical_operator.unwrap_or_default();

        for (offset, condition) in rest.iter().enumerate() {
            let index = offset + 1;
            let (result, actual) = self.check_condition(condition, record).await;

            let op = match condition.logical_operator {
                Some(op) => {
                    carry = op;
                    op
                }
                None => {
                    tracing::debug!("Condition {} reuses carried operator {}", index, carry);
                    carry
                }
            };

            running = op.apply(running, result);
            tracing::debug!("Condition {} joined with {} -> {}", index, op, running);

            if let Some(sink) = trace.as_deref_mut() {
                sink.push(condition_trace(index, condition, actual, Some(op), result));
            }
        }

        running
    }

    async fn fold_groups_traced<R>(
        &self,
        groups: &[Group],
        record: &R,
        mut trace: Option<&mut Vec<GroupTrace>>,
    ) -> bool
    where
        R: RecordLookup + ?Sized,
    {
        let mut running = true;

        for (index, group) in groups.iter().enumerate() {
            let mut condition_traces = trace.is_some().then(Vec::new);
            let result = self
                .fold_conditions_traced(&group.conditions, record, condition_traces.as_mut())
                .await;
            tracing::debug!("Group {} ('{}') -> {}", index, group.name, result);

            running = if index == 0 {
                result
            } else {
                match group.logical_operator {
                    Some(LogicalOperator::Or) => running || result,
                    _ => running && result,
                }
            };

            if let Some(sink) = trace.as_deref_mut() {
                sink.push(GroupTrace {
                    index,
                    name: group.name.clone(),
                    logical_operator: group.logical_operator,
                    result,
                    conditions: condition_traces.unwrap_or_default(),
                });
            }
        }

        running
    }

    /// Verdict plus the record value it was computed from
    async fn check_condition<'r, R>(&self, condition: &Condition, record: &'r R) -> (bool, Option<&'r str>)
    where
        R: RecordLookup + ?Sized,
    {
        let Some(field_type) = condition.field_type else {
            tracing::warn!("Condition without field type, not matched");
            return (false, None);
        };
        let Some(operator) = condition.operator else {
            tracing::warn!("Condition on {} without operator, not matched", field_type);
            return (false, None);
        };

        let expected = condition.value.as_deref();

        if field_type.is_membership() {
            let identifier = record.identifier();
            let result = self.check_membership(operator, identifier, expected).await;
            return (result, identifier);
        }

        let Some(actual) = record.value_of(field_type) else {
            let result = operator == Operator::IsNull;
            tracing::debug!("{} absent, {} -> {}", field_type, operator, result);
            return (result, None);
        };

        let Some(expected) = expected else {
            let result = operator == Operator::IsNotNull;
            tracing::debug!("{} has no configured value, {} -> {}", field_type, operator, result);
            return (result, Some(actual));
        };

        let result = execute_compare(actual, operator, expected);
        tracing::debug!(
            "{} '{}' {} '{}' -> {}",
            field_type,
            actual,
            operator.symbol(),
            expected,
            result
        );
        (result, Some(actual))
    }

    async fn check_membership(
        &self,
        operator: Operator,
        identifier: Option<&str>,
        list_id: Option<&str>,
    ) -> bool {
        let negate = match operator {
            Operator::In | Operator::Equal => false,
            Operator::NotIn | Operator::NotEqual => true,
            other => {
                tracing::debug!("{} does not support {}", FieldType::DistributionGroupsFile, other);
                return false;
            }
        };

        let (Some(identifier), Some(list_id)) = (identifier, list_id) else {
            tracing::debug!("Membership check without identifier or list id, not matched");
            return false;
        };

        match self.membership.exists(identifier, list_id).await {
            Ok(found) => found != negate,
            Err(e) => {
                tracing::warn!("Membership lookup in list '{}' failed: {}", list_id, e);
                false
            }
        }
    }
}

impl Default for FilterEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(ListService::new()))
    }
}

impl std::fmt::Debug for FilterEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterEvaluator").finish_non_exhaustive()
    }
}

fn condition_trace(
    index: usize,
    condition: &Condition,
    actual: Option<&str>,
    joined_with: Option<LogicalOperator>,
    result: bool,
) -> ConditionTrace {
    ConditionTrace {
        index,
        field_type: condition.field_type,
        operator: condition.operator,
        expected: condition.value.clone(),
        actual: actual.map(str::to_string),
        joined_with,
        result,
    }
}
