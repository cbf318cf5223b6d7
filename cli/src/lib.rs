pub mod argparse;
pub mod commands;
pub mod loader;
pub mod utils;

use filter_engine::FilterError;
use std::path::PathBuf;

/// Errors the CLI reports with a hint on how to fix the invocation
#[derive(Debug)]
pub enum CliError {
    InvalidFilterTree(FilterError),
    InvalidExpression(String, FilterError),
    ObjectsNotAList(PathBuf),
    UnknownEntityType(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::InvalidFilterTree(e) => {
                write!(
                    f,
                    "Invalid filter tree: {e}\n\nPossible fixes:\n  - Filter keys must be lists, e.g. \"key\": [\"entity_type\"]\n  - The stix backend accepts a closed list of keys and one key per filter; use --backend entity for arbitrary fields\n  - Use mode \"or\" when a filter on \"ids\" has several values"
                )
            }
            CliError::InvalidExpression(expr, e) => {
                write!(
                    f,
                    "Invalid --where expression '{}': {e}\n\nExpected `key op value`, e.g. \"confidence gt 50\", \"entity_type eq Malware|Software\" or \"objectMarking not_nil\".",
                    expr
                )
            }
            CliError::ObjectsNotAList(path) => {
                write!(
                    f,
                    "{} does not hold a list of objects\n\nProvide a JSON array of objects or a STIX bundle with an \"objects\" array.",
                    path.display()
                )
            }
            CliError::UnknownEntityType(entity_type) => {
                write!(
                    f,
                    "Unknown entity type: '{}'\n\nUse a platform type such as Malware, Report or IPv4-Addr, or a STIX type such as ipv4-addr.",
                    entity_type
                )
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::InvalidFilterTree(e) => Some(e),
            CliError::InvalidExpression(_, e) => Some(e),
            CliError::ObjectsNotAList(_) => None,
            CliError::UnknownEntityType(_) => None,
        }
    }
}
