use crate::CliError;
use anyhow::Context;
use filter_engine::{Filter, FilterGroup, ResolutionMap};
use serde_json::Value;
use std::path::Path;
use std::str::FromStr;

/// Objects to filter: a JSON array, or a STIX bundle whose `objects` are taken
pub fn load_objects(path: &Path) -> anyhow::Result<Vec<Value>> {
    let content = fs_err::read_to_string(path)?;
    let parsed: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", path.display()))?;
    match parsed {
        Value::Array(objects) => Ok(objects),
        Value::Object(mut bundle) => match bundle.remove("objects") {
            Some(Value::Array(objects)) => Ok(objects),
            _ => Err(CliError::ObjectsNotAList(path.to_path_buf()).into()),
        },
        _ => Err(CliError::ObjectsNotAList(path.to_path_buf()).into()),
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

pub fn load_filters(path: &Path) -> anyhow::Result<FilterGroup> {
    let content = fs_err::read_to_string(path)?;
    let group = if is_yaml(path) {
        serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse filter tree {} as YAML", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse filter tree {} as JSON", path.display()))?
    };
    Ok(group)
}

/// An empty map when no file is given: every value then passes through
pub fn load_resolution(path: Option<&Path>) -> anyhow::Result<ResolutionMap> {
    let Some(path) = path else {
        return Ok(ResolutionMap::new());
    };
    let content = fs_err::read_to_string(path)?;
    let map: ResolutionMap = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse resolution map {}", path.display()))?;
    log::debug!("Loaded {} resolution entries", map.len());
    Ok(map)
}

/// One group out of the `--where` expressions, AND-ed unless `any`
pub fn filters_from_expressions(expressions: &[String], any: bool) -> Result<FilterGroup, CliError> {
    let mut group = if any {
        FilterGroup::or()
    } else {
        FilterGroup::and()
    };
    for expr in expressions {
        let filter = Filter::from_str(expr)
            .map_err(|e| CliError::InvalidExpression(expr.clone(), e))?;
        group = group.with_filter(filter);
    }
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_engine::{FilterMode, FilterOperator};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_objects_from_array_and_bundle() {
        let array = temp_file(".json", r#"[{"type": "malware"}, {"type": "report"}]"#);
        assert_eq!(load_objects(array.path()).unwrap().len(), 2);

        let bundle = temp_file(
            ".json",
            r#"{"type": "bundle", "id": "bundle--1", "objects": [{"type": "malware"}]}"#,
        );
        assert_eq!(load_objects(bundle.path()).unwrap().len(), 1);

        let scalar = temp_file(".json", "42");
        let err = load_objects(scalar.path()).unwrap_err();
        assert!(err.to_string().contains("does not hold a list of objects"));
    }

    #[test]
    fn test_load_missing_file_names_the_path() {
        let err = load_objects(Path::new("/nonexistent/objects.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/objects.json"));
    }

    #[test]
    fn test_load_filters_yaml() {
        let yaml = temp_file(
            ".yaml",
            "mode: or\nfilters:\n  - key: [entity_type]\n    operator: eq\n    values: [Malware, Software]\nfilterGroups: []\n",
        );
        let group = load_filters(yaml.path()).unwrap();
        assert_eq!(group.mode, FilterMode::Or);
        assert_eq!(group.filters[0].values, vec!["Malware", "Software"]);
    }

    #[test]
    fn test_load_filters_json_error_has_context() {
        let broken = temp_file(".json", "{not json");
        let err = load_filters(broken.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse filter tree"));
    }

    #[test]
    fn test_load_resolution() {
        assert!(load_resolution(None).unwrap().is_empty());
        let file = temp_file(".json", r#"{"marking1": "marking-definition--1"}"#);
        let map = load_resolution(Some(file.path())).unwrap();
        assert_eq!(map.get("marking1"), Some("marking-definition--1"));
    }

    #[test]
    fn test_filters_from_expressions() {
        let group = filters_from_expressions(
            &["entity_type eq Malware|Software".to_string(), "confidence >= 50".to_string()],
            true,
        )
        .unwrap();
        assert_eq!(group.mode, FilterMode::Or);
        assert_eq!(group.filters.len(), 2);
        assert_eq!(group.filters[1].operator, FilterOperator::Gte);

        let err = filters_from_expressions(&["confidence".to_string()], false).unwrap_err();
        assert!(matches!(err, CliError::InvalidExpression(_, _)));
    }
}
