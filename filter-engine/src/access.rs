//! Marking-based access control, expressed as synthetic filters that are
//! AND-ed in front of every user-supplied tree.

use crate::filter::{Filter, FilterOperator};
use serde::{Deserialize, Serialize};

/// Key through which every backend exposes a candidate's markings
pub const MARKING_KEY: &str = "objectMarking";

fn default_allow_unmarked() -> bool {
    true
}

/// What the evaluating user is cleared to see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessContext {
    /// Markings the user holds. An object is visible only when each of its
    /// markings is one of these.
    #[serde(default)]
    pub allowed_markings: Vec<String>,
    /// Whether objects without any marking are visible
    #[serde(default = "default_allow_unmarked")]
    pub allow_unmarked: bool,
    /// Skip marking checks entirely
    #[serde(default)]
    pub bypass: bool,
}

impl AccessContext {
    pub fn with_markings<I, S>(markings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_markings: markings.into_iter().map(Into::into).collect(),
            allow_unmarked: true,
            bypass: false,
        }
    }

    pub fn bypass() -> Self {
        Self {
            allowed_markings: Vec::new(),
            allow_unmarked: true,
            bypass: true,
        }
    }

    pub fn deny_unmarked(mut self) -> Self {
        self.allow_unmarked = false;
        self
    }

    /// Filters a candidate must pass before the user tree is looked at
    pub fn access_filters(&self) -> Vec<Filter> {
        if self.bypass {
            return Vec::new();
        }
        let mut filters = vec![Filter::new(
            [MARKING_KEY],
            FilterOperator::SubsetOf,
            self.allowed_markings.iter().cloned(),
        )];
        if !self.allow_unmarked {
            filters.push(Filter::new(
                [MARKING_KEY],
                FilterOperator::NotNil,
                Vec::<String>::new(),
            ));
        }
        filters
    }
}
