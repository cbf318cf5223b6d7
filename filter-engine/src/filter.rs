use crate::errors::FilterError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use strum::{Display, EnumString};

/// How sibling results are combined: across the values of one filter, or
/// across the filters and nested groups of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FilterMode {
    #[serde(alias = "AND")]
    And,
    #[serde(alias = "OR")]
    Or,
}

impl FilterMode {
    /// Combine already computed booleans. An empty input is vacuously true.
    pub fn combine<I: IntoIterator<Item = bool>>(self, results: I) -> bool {
        let mut results = results.into_iter().peekable();
        if results.peek().is_none() {
            return true;
        }
        match self {
            FilterMode::And => results.all(|r| r),
            FilterMode::Or => results.any(|r| r),
        }
    }
}

fn default_group_mode() -> FilterMode {
    FilterMode::And
}

fn default_filter_mode() -> FilterMode {
    FilterMode::Or
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FilterOperator {
    #[default]
    #[strum(to_string = "eq", serialize = "=", serialize = "==")]
    Eq,
    #[strum(to_string = "not_eq", serialize = "!=")]
    NotEq,
    #[strum(to_string = "gt", serialize = ">")]
    Gt,
    #[strum(to_string = "gte", serialize = ">=")]
    Gte,
    #[strum(to_string = "lt", serialize = "<")]
    Lt,
    #[strum(to_string = "lte", serialize = "<=")]
    Lte,
    Nil,
    NotNil,
    Contains,
    NotContains,
    StartsWith,
    NotStartsWith,
    EndsWith,
    NotEndsWith,
    /// Every candidate value is one of the filter values. Backs the access predicate.
    SubsetOf,
}

impl FilterOperator {
    /// Operators that only look at presence, never at `values`
    pub fn ignores_values(&self) -> bool {
        matches!(self, FilterOperator::Nil | FilterOperator::NotNil)
    }

    /// `not_*` operators, evaluated as "no candidate value satisfies the positive form"
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            FilterOperator::NotEq
                | FilterOperator::NotContains
                | FilterOperator::NotStartsWith
                | FilterOperator::NotEndsWith
        )
    }
}

/// Filter key as received from the wire. Only the list form is valid; the
/// scalar form exists so that a malformed payload can be reported instead of
/// failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterKey {
    List(Vec<String>),
    Scalar(String),
}

impl FilterKey {
    pub fn keys(&self) -> Result<&[String], FilterError> {
        match self {
            FilterKey::List(keys) => Ok(keys),
            FilterKey::Scalar(key) => Err(FilterError::KeyFormat(key.clone())),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            FilterKey::List(keys) => keys,
            FilterKey::Scalar(key) => std::slice::from_ref(key),
        }
    }
}

impl From<Vec<String>> for FilterKey {
    fn from(keys: Vec<String>) -> Self {
        FilterKey::List(keys)
    }
}

impl<const N: usize> From<[&str; N]> for FilterKey {
    fn from(keys: [&str; N]) -> Self {
        FilterKey::List(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl From<&[&str]> for FilterKey {
    fn from(keys: &[&str]) -> Self {
        FilterKey::List(keys.iter().map(|k| k.to_string()).collect())
    }
}

fn deserialize_values<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|value| match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "unsupported filter value: {}",
                other
            ))),
        })
        .collect()
}

/// A single leaf condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub key: FilterKey,
    #[serde(default)]
    pub operator: FilterOperator,
    #[serde(default, deserialize_with = "deserialize_values")]
    pub values: Vec<String>,
    #[serde(default = "default_filter_mode")]
    pub mode: FilterMode,
}

impl Filter {
    pub fn new<K, V, S>(key: K, operator: FilterOperator, values: V) -> Self
    where
        K: Into<FilterKey>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            operator,
            values: values.into_iter().map(Into::into).collect(),
            mode: FilterMode::Or,
        }
    }

    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.key.as_slice().join(","), self.operator)?;
        if !self.values.is_empty() {
            let sep = match self.mode {
                FilterMode::And => "&",
                FilterMode::Or => "|",
            };
            write!(f, " {}", self.values.join(sep))?;
        }
        Ok(())
    }
}

lazy_static! {
    static ref FILTER_EXPR: Regex = Regex::new(
        r"^\s*([\w\.\-]+(?:\s*,\s*[\w\.\-]+)*)\s+(not_nil|nil|not_eq|eq|gte|gt|lte|lt|not_contains|contains|not_starts_with|starts_with|not_ends_with|ends_with|subset_of|==|!=|>=|<=|=|>|<)(?:\s+(.*?))?\s*$",
    )
    .expect("filter expression regex is valid");
}

fn parse_values(raw: &str) -> Result<(Vec<String>, FilterMode), FilterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok((Vec::new(), FilterMode::Or));
    }
    let has_and = raw.contains('&');
    let has_or = raw.contains('|');
    if has_and && has_or {
        return Err(FilterError::Parse(format!(
            "cannot mix '&' and '|' between the values of one filter: {}",
            raw
        )));
    }
    let (separator, mode) = if has_and {
        ('&', FilterMode::And)
    } else {
        ('|', FilterMode::Or)
    };
    let values = raw
        .split(separator)
        .map(|v| v.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
        .filter(|v| !v.is_empty())
        .collect();
    Ok((values, mode))
}

/// Compact form `key[,key...] op value[|value...]`, or `value[&value...]` for
/// AND-mode values. Operator and key are separated by whitespace.
impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = FILTER_EXPR.captures(s).ok_or_else(|| {
            FilterError::Parse(format!(
                "expected `key op value` (keys separated by ',', values by '|' or '&'), found {}",
                s
            ))
        })?;
        let keys: Vec<String> = captures[1]
            .split(',')
            .map(|k| k.trim().to_string())
            .collect();
        let operator = FilterOperator::from_str(&captures[2])
            .map_err(|_| FilterError::Parse(format!("invalid operator: {}", &captures[2])))?;
        let raw_values = captures.get(3).map_or("", |m| m.as_str());
        let (values, mode) = parse_values(raw_values)?;
        if operator.ignores_values() && !values.is_empty() {
            return Err(FilterError::Parse(format!(
                "operator {} does not take values, found {}",
                operator, raw_values
            )));
        }
        Ok(Filter {
            key: FilterKey::List(keys),
            operator,
            values,
            mode,
        })
    }
}

/// A node of the filter tree: sibling filters and nested groups combined under one mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    #[serde(default = "default_group_mode")]
    pub mode: FilterMode,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub filter_groups: Vec<FilterGroup>,
}

impl Default for FilterGroup {
    fn default() -> Self {
        Self::and()
    }
}

impl FilterGroup {
    pub fn new(mode: FilterMode) -> Self {
        Self {
            mode,
            filters: Vec::new(),
            filter_groups: Vec::new(),
        }
    }

    pub fn and() -> Self {
        Self::new(FilterMode::And)
    }

    pub fn or() -> Self {
        Self::new(FilterMode::Or)
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_group(mut self, group: FilterGroup) -> Self {
        self.filter_groups.push(group);
        self
    }

    /// True when neither filters nor nested groups are present
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.filter_groups.is_empty()
    }

    /// Nesting depth, a lone group being depth 1
    pub fn depth(&self) -> usize {
        1 + self
            .filter_groups
            .iter()
            .map(FilterGroup::depth)
            .max()
            .unwrap_or(0)
    }
}

impl std::fmt::Display for FilterGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "(*)");
        }
        let joiner = match self.mode {
            FilterMode::And => " AND ",
            FilterMode::Or => " OR ",
        };
        let parts: Vec<String> = self
            .filters
            .iter()
            .map(ToString::to_string)
            .chain(self.filter_groups.iter().map(ToString::to_string))
            .collect();
        write!(f, "({})", parts.join(joiner))
    }
}
