/// Errors raised while validating a filter tree or preparing a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    KeyFormat(String),
    EmptyKey,
    MultiKeyUnsupported,
    UnsupportedKey(String),
    UnsupportedOperatorCombination { key: String },
    MaxDepthExceeded(usize),
    MalformedCandidate(String),
    Parse(String),
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::KeyFormat(key) => {
                write!(f, "The provided filter key is not an array - got \"{}\"", key)
            }
            FilterError::EmptyKey => write!(f, "The provided filter key is empty"),
            FilterError::MultiKeyUnsupported => {
                write!(f, "Stix filtering can only be executed on a unique filter key")
            }
            FilterError::UnsupportedKey(key) => write!(
                f,
                "Stix filtering is not compatible with the provided filter key [{}]",
                key
            ),
            FilterError::UnsupportedOperatorCombination { key } => write!(
                f,
                "'And' operator between values of a filter with key='{}' is not supported",
                key
            ),
            FilterError::MaxDepthExceeded(depth) => {
                write!(f, "Filter groups are nested deeper than {} levels", depth)
            }
            FilterError::MalformedCandidate(msg) => write!(f, "Malformed candidate: {}", msg),
            FilterError::Parse(msg) => write!(f, "Filter parse error: {}", msg),
        }
    }
}

impl std::error::Error for FilterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_key_names_the_key() {
        let msg = FilterError::UnsupportedKey("bad_key".to_string()).to_string();
        assert_eq!(
            msg,
            "Stix filtering is not compatible with the provided filter key [bad_key]"
        );
    }

    #[test]
    fn test_operator_combination_message() {
        let msg = FilterError::UnsupportedOperatorCombination {
            key: "ids".to_string(),
        }
        .to_string();
        assert_eq!(
            msg,
            "'And' operator between values of a filter with key='ids' is not supported"
        );
    }

    #[test]
    fn test_key_format_message() {
        let msg = FilterError::KeyFormat("entity_type".to_string()).to_string();
        assert!(msg.contains("provided filter key is not an array"));
        assert!(msg.contains("entity_type"));
    }

    #[test]
    fn test_empty_key_message() {
        assert_eq!(
            FilterError::EmptyKey.to_string(),
            "The provided filter key is empty"
        );
    }

    #[test]
    fn test_implements_std_error() {
        let error: Box<dyn std::error::Error> = FilterError::MultiKeyUnsupported.into();
        assert!(error.source().is_none());
        assert_eq!(
            error.to_string(),
            "Stix filtering can only be executed on a unique filter key"
        );
    }
}
