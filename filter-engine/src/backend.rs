use crate::candidate::Candidate;
use crate::errors::FilterError;
use crate::resolver::Resolver;

/// How the values of a filter key must be compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Entity or relationship types, compared through the type hierarchy
    Type,
    /// Reference to another object: filter values go through the resolver
    Identifier,
    /// Any of the candidate's own identifiers
    Ids,
    /// Reliability of the candidate's author, looked up through the resolver
    Reliability,
    /// Plain field value
    Value,
}

/// A family of candidates the evaluator knows how to read
pub trait FilterBackend {
    fn name(&self) -> &'static str;

    /// Whether a filter may name several keys, OR-ed together
    fn supports_multi_key(&self) -> bool;

    /// `None` when the key is not supported by this backend
    fn key_kind(&self, key: &str) -> Option<KeyKind>;

    /// Reject candidates the backend cannot read at all
    fn check_candidate<C: Candidate + ?Sized>(&self, _candidate: &C) -> Result<(), FilterError> {
        Ok(())
    }

    /// Raw candidate values for `key`. Type values are expanded through the
    /// hierarchy by the caller.
    fn extract<C: Candidate + ?Sized>(
        &self,
        candidate: &C,
        key: &str,
        resolver: &dyn Resolver,
    ) -> Vec<String>;
}
