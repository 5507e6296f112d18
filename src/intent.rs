use serde_json::{Map, Value};

/// A nested intent record as received from the orchestrator.
pub type Intent = Map<String, Value>;

/// Canonical form of a field name: hyphens become underscores.
pub fn canonical_key(key: &str) -> String {
    key.replace('-', "_")
}

/// Return a copy of `intent` with every key (recursively) in canonical form.
///
/// When `sr-id` and `sr_id` both appear, the first non-null one is kept.
pub fn normalize(intent: &Intent) -> Intent {
    let mut out = Map::with_capacity(intent.len());
    for (key, value) in intent {
        let key = canonical_key(key);
        let value = normalize_value(value);
        match out.get(&key) {
            Some(existing) if !existing.is_null() => {}
            _ => {
                out.insert(key, value);
            }
        }
    }
    out
}

fn normalize_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(normalize(map)),
        Value::Array(items) => Value::Array(items.iter().map(normalize_value).collect()),
        other => other.clone(),
    }
}

/// Look up `field` in a normalized intent, ignoring hyphen/underscore
/// spelling and treating `null` as absent.
pub fn get<'a>(intent: &'a Intent, field: &str) -> Option<&'a Value> {
    intent.get(&canonical_key(field)).filter(|v| !v.is_null())
}

/// Look up a nested field by dotted path (`loopback_attribs.sr_id`).
pub fn get_path<'a>(intent: &'a Intent, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = get(intent, parts.next()?)?;
    for part in parts {
        current = get(current.as_object()?, part)?;
    }
    Some(current)
}

/// Nested mapping stored under `field`, if any.
pub fn get_map<'a>(intent: &'a Intent, field: &str) -> Option<&'a Intent> {
    get(intent, field).and_then(Value::as_object)
}

/// True when the field is present and non-null.
pub fn contains(intent: &Intent, field: &str) -> bool {
    get(intent, field).is_some()
}

/// Python-style truthiness used by the vendor flag rules.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Render a scalar the way the rendering layer expects it.
///
/// Returns `None` for null, mappings and sequences, which have no scalar
/// form.
pub fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Bool(true) => Some("true".to_string()),
        Value::Bool(false) => Some("false".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Scalar rendering that collapses missing and empty-string values.
pub fn scalar_string(value: Option<&Value>) -> Option<String> {
    value.and_then(render_scalar).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Intent {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_normalize_rewrites_nested_keys() {
        let intent = obj(json!({
            "area-id": "49.0010",
            "loopback-attribs": { "sr-id": 10, "unicast_tag": 7 },
        }));
        let normalized = normalize(&intent);
        assert_eq!(normalized["area_id"], json!("49.0010"));
        assert_eq!(normalized["loopback_attribs"]["sr_id"], json!(10));
        assert_eq!(normalized["loopback_attribs"]["unicast_tag"], json!(7));
        // caller's copy untouched
        assert!(intent.contains_key("area-id"));
    }

    #[test]
    fn test_normalize_prefers_first_non_null_spelling() {
        let intent = obj(json!({ "sr-id": null, "sr_id": 4 }));
        assert_eq!(normalize(&intent)["sr_id"], json!(4));

        let intent = obj(json!({ "sr-id": 1, "sr_id": 4 }));
        assert_eq!(normalize(&intent)["sr_id"], json!(1));
    }

    #[test]
    fn test_lookup_is_spelling_insensitive() {
        let intent = normalize(&obj(json!({ "is-name": "r1", "fast_reroute": { "ti-lfa-level": "level-2" } })));
        assert_eq!(get(&intent, "is_name"), Some(&json!("r1")));
        assert_eq!(get(&intent, "is-name"), Some(&json!("r1")));
        assert_eq!(get_path(&intent, "fast-reroute.ti_lfa_level"), Some(&json!("level-2")));
        assert_eq!(get_path(&intent, "fast_reroute.missing"), None);
    }

    #[test]
    fn test_null_is_absent() {
        let intent = obj(json!({ "net_id": null }));
        assert!(!contains(&intent, "net_id"));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!({}))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(is_truthy(Some(&json!({ "lower_bound": 16000 }))));
        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!("x"))));
    }

    #[test]
    fn test_render_scalar() {
        assert_eq!(render_scalar(&json!(true)), Some("true".into()));
        assert_eq!(render_scalar(&json!(5)), Some("5".into()));
        assert_eq!(render_scalar(&json!("GE0/0/1")), Some("GE0/0/1".into()));
        assert_eq!(render_scalar(&json!([1, 2])), None);
        assert_eq!(render_scalar(&Value::Null), None);
    }
}
