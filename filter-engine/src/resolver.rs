use ahash::AHasher;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::hash::BuildHasherDefault;

pub type AHashMap<K, V> = HashMap<K, V, BuildHasherDefault<AHasher>>;

/// Translates a raw identifier found in a filter (internal id, short id,
/// display id) into the canonical identifier stored on candidates.
pub trait Resolver {
    fn resolve(&self, raw: &str) -> Option<String>;

    /// Pass-through when the value is unknown
    fn resolve_or_raw(&self, raw: &str) -> String {
        self.resolve(raw).unwrap_or_else(|| raw.to_string())
    }
}

/// Resolver that knows nothing: every value passes through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl Resolver for IdentityResolver {
    fn resolve(&self, _raw: &str) -> Option<String> {
        None
    }
}

/// Wraps a lookup closure, e.g. one backed by a cache filled before the batch
pub struct FnResolver<F>(pub F);

impl<F> Resolver for FnResolver<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, raw: &str) -> Option<String> {
        (self.0)(raw)
    }
}

impl<S: BuildHasher> Resolver for HashMap<String, String, S> {
    fn resolve(&self, raw: &str) -> Option<String> {
        self.get(raw).cloned()
    }
}

/// In-memory resolution map, populated by the caller for one query batch
/// and read-only while candidates are evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolutionMap(AHashMap<String, String>);

impl ResolutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, raw: &str, canonical: &str) -> Option<String> {
        self.0.insert(raw.to_string(), canonical.to_string())
    }

    pub fn with(mut self, raw: &str, canonical: &str) -> Self {
        self.insert(raw, canonical);
        self
    }

    pub fn get(&self, raw: &str) -> Option<&str> {
        self.0.get(raw).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResolutionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Resolver for ResolutionMap {
    fn resolve(&self, raw: &str) -> Option<String> {
        self.get(raw).map(str::to_string)
    }
}
