use crate::access::AccessContext;
use crate::backend::FilterBackend;
use crate::candidate::Candidate;
use crate::errors::FilterError;
use crate::filter::{Filter, FilterGroup};
use crate::group::{evaluate_group, validate_filter, validate_group};
use crate::predicate::evaluate_filter;
use crate::resolver::Resolver;

/// Backend, resolver and access restrictions bundled for repeated use.
///
/// The resolver is borrowed for the evaluator's lifetime and must be safe to
/// read from several threads, so a whole batch can be fanned out.
pub struct FilterEvaluator<'r, B> {
    backend: B,
    resolver: &'r (dyn Resolver + Sync),
    access_filters: Vec<Filter>,
}

impl<'r, B: FilterBackend> FilterEvaluator<'r, B> {
    pub fn new(backend: B, resolver: &'r (dyn Resolver + Sync)) -> Self {
        Self {
            backend,
            resolver,
            access_filters: Vec::new(),
        }
    }

    pub fn with_access(mut self, access: &AccessContext) -> Self {
        self.access_filters = access.access_filters();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn validate(&self, group: &FilterGroup) -> Result<(), FilterError> {
        validate_group(&self.backend, group)
    }

    /// Test a single filter, access restrictions not applied
    pub fn evaluate<C: Candidate + ?Sized>(
        &self,
        candidate: &C,
        filter: &Filter,
    ) -> Result<bool, FilterError> {
        validate_filter(&self.backend, filter)?;
        self.backend.check_candidate(candidate)?;
        Ok(evaluate_filter(
            &self.backend,
            candidate,
            filter,
            self.resolver,
        ))
    }

    pub fn matches<C: Candidate + ?Sized>(
        &self,
        candidate: &C,
        group: &FilterGroup,
    ) -> Result<bool, FilterError> {
        self.validate(group)?;
        self.matches_validated(candidate, group)
    }

    /// Same as [`matches`](Self::matches) for a tree already checked with
    /// [`validate`](Self::validate). Only candidate errors remain possible.
    pub fn matches_validated<C: Candidate + ?Sized>(
        &self,
        candidate: &C,
        group: &FilterGroup,
    ) -> Result<bool, FilterError> {
        self.backend.check_candidate(candidate)?;
        let visible = self
            .access_filters
            .iter()
            .all(|filter| evaluate_filter(&self.backend, candidate, filter, self.resolver));
        if !visible {
            log::debug!("Candidate hidden by marking restrictions");
            return Ok(false);
        }
        Ok(evaluate_group(
            &self.backend,
            candidate,
            group,
            self.resolver,
        ))
    }
}
