use serde_json::Value;

/// Anything a filter tree can be tested against. The evaluator only ever
/// asks for the scalar values found at a field path.
pub trait Candidate {
    /// Scalar values at `path`, arrays flattened. Absent fields, nulls and
    /// empty strings yield nothing.
    fn values_at(&self, path: &[&str]) -> Vec<String>;

    /// Whether the candidate is a keyed record at all
    fn is_record(&self) -> bool;
}

impl Candidate for Value {
    fn values_at(&self, path: &[&str]) -> Vec<String> {
        let mut current = self;
        for segment in path {
            match current.get(segment) {
                Some(v) => current = v,
                None => return Vec::new(),
            }
        }
        let mut out = Vec::new();
        flatten_scalars(current, &mut out);
        out
    }

    fn is_record(&self) -> bool {
        self.is_object()
    }
}

fn flatten_scalars(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null | Value::Object(_) => {}
        Value::String(s) if s.is_empty() => {}
        Value::String(s) => out.push(s.clone()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Array(items) => items.iter().for_each(|item| flatten_scalars(item, out)),
    }
}

/// Split a dotted key into path segments
pub fn split_path(key: &str) -> Vec<&str> {
    key.split('.').filter(|s| !s.is_empty()).collect()
}
