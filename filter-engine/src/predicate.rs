//! Leaf filter evaluation: a filter's operator and values against the values
//! extracted from one candidate.

use crate::backend::{FilterBackend, KeyKind};
use crate::candidate::Candidate;
use crate::filter::{Filter, FilterMode, FilterOperator};
use crate::resolver::Resolver;
use crate::type_hierarchy;
use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
        })
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Order two raw values: numerically when both are numbers, chronologically
/// when both are dates, as booleans when both are booleans, else as strings.
pub fn compare_scalars(candidate: &str, value: &str) -> Ordering {
    if let (Some(a), Some(b)) = (parse_number(candidate), parse_number(value)) {
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }
    if let (Some(a), Some(b)) = (parse_date(candidate), parse_date(value)) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (parse_bool(candidate), parse_bool(value)) {
        return a.cmp(&b);
    }
    candidate.cmp(value)
}

fn scalars_equal(candidate: &str, value: &str) -> bool {
    compare_scalars(candidate, value) == Ordering::Equal
}

/// One filter value against all candidate values. Negative operators hold
/// when no candidate satisfies their positive counterpart.
fn test_single_value(operator: FilterOperator, value: &str, candidates: &[String]) -> bool {
    let lowered = value.to_lowercase();
    let satisfies = |candidate: &str| match operator {
        FilterOperator::Eq | FilterOperator::NotEq => scalars_equal(candidate, value),
        FilterOperator::Gt => compare_scalars(candidate, value) == Ordering::Greater,
        FilterOperator::Gte => compare_scalars(candidate, value) != Ordering::Less,
        FilterOperator::Lt => compare_scalars(candidate, value) == Ordering::Less,
        FilterOperator::Lte => compare_scalars(candidate, value) != Ordering::Greater,
        FilterOperator::Contains | FilterOperator::NotContains => {
            candidate.to_lowercase().contains(&lowered)
        }
        FilterOperator::StartsWith | FilterOperator::NotStartsWith => {
            candidate.to_lowercase().starts_with(&lowered)
        }
        FilterOperator::EndsWith | FilterOperator::NotEndsWith => {
            candidate.to_lowercase().ends_with(&lowered)
        }
        // resolved before per-value dispatch
        FilterOperator::Nil | FilterOperator::NotNil | FilterOperator::SubsetOf => false,
    };
    let found = candidates.iter().any(|c| satisfies(c));
    if operator.is_negative() {
        !found
    } else {
        found
    }
}

/// Generic test of a filter against candidate values.
///
/// With `mode = and` every filter value must pass, with `mode = or` one is
/// enough. Negative operators are tested per value, so `not_eq` in AND mode
/// is the complement of `eq` in OR mode and vice versa.
pub fn test_values(
    operator: FilterOperator,
    mode: FilterMode,
    values: &[String],
    candidates: &[String],
) -> bool {
    // "(not) nil" and "(not) equal to nothing" are the same question
    if operator == FilterOperator::Nil || (operator == FilterOperator::Eq && values.is_empty()) {
        return candidates.is_empty();
    }
    if operator == FilterOperator::NotNil
        || (operator == FilterOperator::NotEq && values.is_empty())
    {
        return !candidates.is_empty();
    }
    if operator == FilterOperator::SubsetOf {
        return candidates
            .iter()
            .all(|c| values.iter().any(|v| scalars_equal(c, v)));
    }
    if values.is_empty() {
        return false;
    }
    match mode {
        FilterMode::And => values
            .iter()
            .all(|v| test_single_value(operator, v, candidates)),
        FilterMode::Or => values
            .iter()
            .any(|v| test_single_value(operator, v, candidates)),
    }
}

/// Filter values as they must be compared for a key of `kind`
fn prepare_values(kind: KeyKind, values: &[String], resolver: &dyn Resolver) -> Vec<String> {
    match kind {
        KeyKind::Identifier | KeyKind::Ids => {
            values.iter().map(|v| resolver.resolve_or_raw(v)).collect()
        }
        KeyKind::Type => values
            .iter()
            .map(|v| {
                type_hierarchy::canonical_name(v)
                    .map(str::to_string)
                    .unwrap_or_else(|| v.clone())
            })
            .collect(),
        KeyKind::Reliability | KeyKind::Value => values.to_vec(),
    }
}

/// Candidate values as they must be compared for a key of `kind`
fn prepare_candidates(kind: KeyKind, raw: Vec<String>) -> Vec<String> {
    match kind {
        KeyKind::Type => {
            let mut expanded: Vec<String> = Vec::new();
            for t in raw.iter().flat_map(|t| type_hierarchy::expand(t)) {
                if !expanded.contains(&t) {
                    expanded.push(t);
                }
            }
            expanded
        }
        _ => raw,
    }
}

/// Evaluate one already validated filter against one candidate. Multiple
/// keys are OR-ed: any key satisfying the condition satisfies the filter.
pub fn evaluate_filter<B, C>(
    backend: &B,
    candidate: &C,
    filter: &Filter,
    resolver: &dyn Resolver,
) -> bool
where
    B: FilterBackend,
    C: Candidate + ?Sized,
{
    filter.key.as_slice().iter().any(|key| {
        let kind = backend.key_kind(key).unwrap_or(KeyKind::Value);
        let candidates = prepare_candidates(kind, backend.extract(candidate, key, resolver));
        let values = prepare_values(kind, &filter.values, resolver);
        let verdict = test_values(filter.operator, filter.mode, &values, &candidates);
        log::trace!(
            "filter [{}] on key {}: candidates={:?} => {}",
            filter,
            key,
            candidates,
            verdict
        );
        verdict
    })
}
