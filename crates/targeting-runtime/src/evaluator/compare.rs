//! Comparison operator execution
//!
//! Both sides are present by the time these run; null checks and
//! distribution-list membership are resolved by the caller.

use regex::Regex;
use std::cmp::Ordering;
use targeting_core::Operator;

/// Execute a comparison of a record value against a configured value
pub(crate) fn execute_compare(actual: &str, op: Operator, expected: &str) -> bool {
    match op {
        Operator::Equal => actual == expected,
        Operator::NotEqual => actual != expected,

        Operator::Contains => actual.to_lowercase().contains(&expected.to_lowercase()),
        Operator::NotContains => !actual.to_lowercase().contains(&expected.to_lowercase()),
        Operator::StartsWith => actual.to_lowercase().starts_with(&expected.to_lowercase()),
        Operator::EndsWith => actual.to_lowercase().ends_with(&expected.to_lowercase()),

        Operator::GreaterThan => compare_ordinal(actual, expected) == Ordering::Greater,
        Operator::GreaterThanOrEqual => compare_ordinal(actual, expected) != Ordering::Less,
        Operator::LessThan => compare_ordinal(actual, expected) == Ordering::Less,
        Operator::LessThanOrEqual => compare_ordinal(actual, expected) != Ordering::Greater,

        Operator::In => parse_list(expected).any(|item| item == actual),
        Operator::NotIn => !parse_list(expected).any(|item| item == actual),

        Operator::Regex => matches_regex(actual, expected),

        // Both sides are present here
        Operator::IsNull => false,
        Operator::IsNotNull => true,
    }
}

/// Numeric comparison when both sides parse as numbers, ordinal string
/// comparison otherwise
///
/// Multi-segment versions (`"2.2.1"`) never parse, so they compare as
/// strings; `"10.0.0"` sorts before `"2.0.0"`.
pub(crate) fn compare_ordinal(actual: &str, expected: &str) -> Ordering {
    match (actual.trim().parse::<f64>(), expected.trim().parse::<f64>()) {
        (Ok(l), Ok(r)) => l.total_cmp(&r),
        _ => actual.cmp(expected),
    }
}

/// Split a list value into tokens
///
/// Accepts plain CSV (`a, b`) and JSON-array style (`["a","b"]`).
pub(crate) fn parse_list(value: &str) -> impl Iterator<Item = &str> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(']').unwrap_or(trimmed);

    trimmed
        .split(',')
        .map(|token| token.trim().trim_matches('"').trim())
}

fn matches_regex(actual: &str, pattern: &str) -> bool {
    match Regex::new(&format!("^(?:{})$", pattern)) {
        Ok(re) => re.is_match(actual),
        Err(e) => {
            tracing::warn!("Invalid regex pattern '{}': {}", pattern, e);
            false
        }
    }
}
