//! In-memory filtering of candidate lists, as done on stream and webhook
//! payloads before they are dispatched.

use crate::backend::FilterBackend;
use crate::candidate::Candidate;
use crate::errors::FilterError;
use crate::evaluator::FilterEvaluator;
use crate::filter::FilterGroup;
use rayon::prelude::*;

/// A candidate that could not be evaluated at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    /// Position of the candidate in the input list
    pub index: usize,
    pub error: FilterError,
}

#[derive(Debug)]
pub struct BatchOutcome<'c, C> {
    /// Matching candidates, in input order
    pub matched: Vec<&'c C>,
    pub failures: Vec<CandidateFailure>,
}

impl<C> BatchOutcome<'_, C> {
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

impl<'c, C> Default for BatchOutcome<'c, C> {
    fn default() -> Self {
        Self {
            matched: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<'c, C> BatchOutcome<'c, C> {
    fn push(&mut self, index: usize, candidate: &'c C, verdict: Result<bool, FilterError>) {
        match verdict {
            Ok(true) => self.matched.push(candidate),
            Ok(false) => {}
            Err(error) => {
                log::warn!("Skipping candidate #{}: {}", index, error);
                self.failures.push(CandidateFailure { index, error });
            }
        }
    }
}

impl<'r, B: FilterBackend> FilterEvaluator<'r, B> {
    /// Keep the candidates matching `group`. The tree is validated once; a
    /// tree error aborts the batch, a malformed candidate is only skipped.
    pub fn filter_many<'c, C: Candidate>(
        &self,
        candidates: &'c [C],
        group: &FilterGroup,
    ) -> Result<BatchOutcome<'c, C>, FilterError> {
        self.validate(group)?;
        let mut outcome = BatchOutcome::default();
        for (index, candidate) in candidates.iter().enumerate() {
            outcome.push(index, candidate, self.matches_validated(candidate, group));
        }
        log::debug!(
            "Filter {} kept {} of {} candidates on the {} backend",
            group,
            outcome.matched.len(),
            candidates.len(),
            self.backend().name()
        );
        Ok(outcome)
    }

    /// Same result as [`filter_many`](Self::filter_many), with candidates
    /// evaluated on the rayon thread pool
    pub fn par_filter_many<'c, C>(
        &self,
        candidates: &'c [C],
        group: &FilterGroup,
    ) -> Result<BatchOutcome<'c, C>, FilterError>
    where
        B: Sync,
        C: Candidate + Sync,
    {
        self.validate(group)?;
        let verdicts: Vec<Result<bool, FilterError>> = candidates
            .par_iter()
            .map(|candidate| self.matches_validated(candidate, group))
            .collect();
        let mut outcome = BatchOutcome::default();
        for (index, (candidate, verdict)) in candidates.iter().zip(verdicts).enumerate() {
            outcome.push(index, candidate, verdict);
        }
        log::debug!(
            "Filter {} kept {} of {} candidates on the {} backend, in parallel",
            group,
            outcome.matched.len(),
            candidates.len(),
            self.backend().name()
        );
        Ok(outcome)
    }

    pub fn count_matches<C: Candidate>(
        &self,
        candidates: &[C],
        group: &FilterGroup,
    ) -> Result<usize, FilterError> {
        Ok(self.filter_many(candidates, group)?.len())
    }
}
