//! Recursive filter-group evaluation.
//!
//! A tree is validated once, up front: malformed keys and unsupported
//! combinations are reported no matter which candidate is evaluated and no
//! matter how sibling evaluation short-circuits. Evaluation itself is then
//! infallible and side-effect free.

use crate::backend::{FilterBackend, KeyKind};
use crate::candidate::Candidate;
use crate::errors::FilterError;
use crate::filter::{Filter, FilterGroup, FilterMode};
use crate::predicate::evaluate_filter;
use crate::resolver::Resolver;

/// Deepest accepted nesting of filter groups, the root group counting as 1
pub const MAX_FILTER_DEPTH: usize = 32;

pub fn validate_filter<B: FilterBackend>(backend: &B, filter: &Filter) -> Result<(), FilterError> {
    let keys = filter.key.keys()?;
    if keys.is_empty() {
        return Err(FilterError::EmptyKey);
    }
    if keys.len() > 1 && !backend.supports_multi_key() {
        return Err(FilterError::MultiKeyUnsupported);
    }
    for key in keys {
        let kind = backend
            .key_kind(key)
            .ok_or_else(|| FilterError::UnsupportedKey(key.clone()))?;
        if kind == KeyKind::Ids && filter.mode == FilterMode::And && filter.values.len() > 1 {
            return Err(FilterError::UnsupportedOperatorCombination { key: key.clone() });
        }
    }
    Ok(())
}

fn validate_at_depth<B: FilterBackend>(
    backend: &B,
    group: &FilterGroup,
    depth: usize,
) -> Result<(), FilterError> {
    if depth > MAX_FILTER_DEPTH {
        return Err(FilterError::MaxDepthExceeded(MAX_FILTER_DEPTH));
    }
    for filter in &group.filters {
        validate_filter(backend, filter)?;
    }
    for nested in &group.filter_groups {
        validate_at_depth(backend, nested, depth + 1)?;
    }
    Ok(())
}

pub fn validate_group<B: FilterBackend>(backend: &B, group: &FilterGroup) -> Result<(), FilterError> {
    validate_at_depth(backend, group, 1)
}

/// Evaluate a validated group. Direct filters and nested groups are combined
/// under the group's mode; an empty group is vacuously true.
pub fn evaluate_group<B, C>(
    backend: &B,
    candidate: &C,
    group: &FilterGroup,
    resolver: &dyn Resolver,
) -> bool
where
    B: FilterBackend,
    C: Candidate + ?Sized,
{
    let filter_results = group
        .filters
        .iter()
        .map(|filter| evaluate_filter(backend, candidate, filter, resolver));
    let group_results = group
        .filter_groups
        .iter()
        .map(|nested| evaluate_group(backend, candidate, nested, resolver));
    group.mode.combine(filter_results.chain(group_results))
}
