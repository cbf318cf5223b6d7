//! Matching engine for recursive filter trees.
//!
//! A [`FilterGroup`] combines leaf [`Filter`]s and nested groups under AND/OR.
//! Trees are evaluated against candidates (raw STIX objects or indexed
//! platform entities, see [`StixBackend`] and [`EntityBackend`]) with entity
//! types expanded through the type hierarchy and identifier values
//! translated by a [`Resolver`].
//!
//! ```
//! use filter_engine::{Filter, FilterEvaluator, FilterGroup, FilterOperator};
//! use filter_engine::{IdentityResolver, StixBackend};
//! use serde_json::json;
//!
//! let evaluator = FilterEvaluator::new(StixBackend, &IdentityResolver);
//! let group = FilterGroup::and().with_filter(Filter::new(
//!     ["entity_type"],
//!     FilterOperator::Eq,
//!     ["Stix-Domain-Object"],
//! ));
//! assert_eq!(evaluator.matches(&json!({"type": "malware"}), &group), Ok(true));
//! ```

pub mod access;
pub mod backend;
pub mod batch;
pub mod candidate;
pub mod entity;
pub mod errors;
pub mod evaluator;
pub mod filter;
pub mod group;
pub mod predicate;
pub mod resolver;
pub mod stix;
pub mod type_hierarchy;

pub use access::AccessContext;
pub use backend::{FilterBackend, KeyKind};
pub use batch::{BatchOutcome, CandidateFailure};
pub use candidate::Candidate;
pub use entity::EntityBackend;
pub use errors::FilterError;
pub use evaluator::FilterEvaluator;
pub use filter::{Filter, FilterGroup, FilterKey, FilterMode, FilterOperator};
pub use group::MAX_FILTER_DEPTH;
pub use resolver::{FnResolver, IdentityResolver, ResolutionMap, Resolver};
pub use stix::StixBackend;
