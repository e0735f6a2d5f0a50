//! Id assignment and save stamping shared by repository implementations

use chrono::{DateTime, Utc};
use targeting_core::Filter;

/// Next ids to hand out for filters, groups and conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence {
    next_filter: i64,
    next_group: i64,
    next_condition: i64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self {
            next_filter: 1,
            next_group: 1,
            next_condition: 1,
        }
    }
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move every counter past the ids already used by `filter`
    pub fn observe(&mut self, filter: &Filter) {
        if let Some(id) = filter.id {
            self.next_filter = self.next_filter.max(id + 1);
        }
        for condition in filter.conditions.iter().chain(filter.groups.iter().flat_map(|g| &g.conditions)) {
            if let Some(id) = condition.id {
                self.next_condition = self.next_condition.max(id + 1);
            }
        }
        for group in &filter.groups {
            if let Some(id) = group.id {
                self.next_group = self.next_group.max(id + 1);
            }
        }
    }

    fn take(counter: &mut i64) -> i64 {
        let id = *counter;
        *counter += 1;
        id
    }

    /// Prepare a filter for storage
    ///
    /// `created` is the creation time of the stored version, if any.
    pub fn stamp(&mut self, mut filter: Filter, created: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Filter {
        if filter.id.is_none() {
            filter.id = Some(Self::take(&mut self.next_filter));
        }

        filter.date_create = created.or(filter.date_create).or(Some(now));
        filter.last_update = Some(now);

        for group in &mut filter.groups {
            if group.id.is_none() {
                group.id = Some(Self::take(&mut self.next_group));
            }
            for condition in &mut group.conditions {
                if condition.id.is_none() {
                    condition.id = Some(Self::take(&mut self.next_condition));
                }
            }
        }
        for condition in &mut filter.conditions {
            if condition.id.is_none() {
                condition.id = Some(Self::take(&mut self.next_condition));
            }
        }

        let filter = filter.with_positions_from_order();
        self.observe(&filter);
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use targeting_core::{Condition, FieldType, Group, LogicalOperator, Operator};

    fn sample() -> Filter {
        Filter::new("f", 1)
            .with_condition(Condition::new(FieldType::Country, Operator::Equal, "UA"))
            .with_group(
                Group::new("g", LogicalOperator::And)
                    .with_condition(Condition::new(FieldType::Browser, Operator::Equal, "Chrome"))
                    .with_condition(Condition::new(FieldType::Browser, Operator::Equal, "Safari").or()),
            )
    }

    #[test]
    fn test_stamp_assigns_ids_and_positions() {
        let mut seq = IdSequence::new();
        let now = Utc::now();
        let stored = seq.stamp(sample(), None, now);

        assert_eq!(stored.id, Some(1));
        assert_eq!(stored.date_create, Some(now));
        assert_eq!(stored.last_update, Some(now));

        let group = &stored.groups[0];
        assert_eq!(group.id, Some(1));
        assert_eq!(group.conditions[0].group_id, Some(1));
        assert_eq!(group.conditions[1].order_index, 1);
        assert!(stored.conditions[0].id.is_some());
        assert_eq!(stored.conditions[0].group_id, None);

        let second = seq.stamp(sample(), None, now);
        assert_eq!(second.id, Some(2));
        assert_eq!(second.groups[0].id, Some(2));
    }

    #[test]
    fn test_restamp_keeps_creation_time() {
        let mut seq = IdSequence::new();
        let created = Utc::now() - chrono::Duration::days(1);
        let now = Utc::now();

        let mut filter = sample();
        filter.id = Some(10);
        let stored = seq.stamp(filter, Some(created), now);

        assert_eq!(stored.id, Some(10));
        assert_eq!(stored.date_create, Some(created));
        assert_eq!(stored.last_update, Some(now));

        // Counter moved past the explicit id
        let next = seq.stamp(sample(), None, now);
        assert_eq!(next.id, Some(11));
    }

    #[test]
    fn test_observe_moves_counters() {
        let mut seq = IdSequence::new();
        let mut filter = sample();
        filter.id = Some(5);
        filter.groups[0].id = Some(9);
        filter.conditions[0].id = Some(20);
        seq.observe(&filter);

        let stored = seq.stamp(sample(), None, Utc::now());
        assert_eq!(stored.id, Some(6));
        assert_eq!(stored.groups[0].id, Some(10));
        assert!(stored.conditions[0].id.unwrap() > 20);
    }
}
