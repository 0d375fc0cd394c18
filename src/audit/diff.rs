//! Change-set derivation for audit logging
//!
//! Computes human-readable, field-level change descriptions between a
//! "before" and an "after" snapshot of a record.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Bookkeeping fields that never appear in a derived change
pub const RESERVED_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

/// Derive an ordered list of human-readable change descriptions
///
/// Returns an empty list when either snapshot is absent (creations and
/// deletions carry their full snapshot instead of a diff). Keys are visited
/// in ascending order over the union of both maps so the output is
/// deterministic. Pure function, no error conditions.
pub fn derive_changes(
    before: Option<&Map<String, Value>>,
    after: Option<&Map<String, Value>>,
) -> Vec<String> {
    let (Some(before), Some(after)) = (before, after) else {
        return Vec::new();
    };

    let keys: BTreeSet<&str> = before
        .keys()
        .chain(after.keys())
        .map(String::as_str)
        .collect();

    let mut changes = Vec::new();
    for key in keys {
        if RESERVED_FIELDS.contains(&key) {
            continue;
        }

        match (before.get(key), after.get(key)) {
            (None, Some(added)) => {
                changes.push(format!("{}: added \"{}\"", key, format_value(added)));
            }
            (Some(removed), None) => {
                changes.push(format!("{}: removed \"{}\"", key, format_value(removed)));
            }
            (Some(b), Some(a)) if b != a => {
                changes.push(format!(
                    "{}: \"{}\" → \"{}\"",
                    key,
                    format_value(b),
                    format_value(a)
                ));
            }
            _ => {}
        }
    }

    changes
}

/// Format a JSON value for human-readable display inside a change description
///
/// Scalars render as their string representation; collections are summarized
/// rather than expanded.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(_) => "[object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_absent_side_yields_empty() {
        let snapshot = obj(json!({"a": 1}));
        assert!(derive_changes(None, Some(&snapshot)).is_empty());
        assert!(derive_changes(Some(&snapshot), None).is_empty());
        assert!(derive_changes(None, None).is_empty());
    }

    #[test]
    fn test_equal_maps_yield_empty() {
        let before = obj(json!({"name": "Volta", "stock": 4, "tags": [1, 2]}));
        let after = before.clone();
        assert!(derive_changes(Some(&before), Some(&after)).is_empty());
    }

    #[test]
    fn test_added_field() {
        let before = obj(json!({"a": 1}));
        let after = obj(json!({"a": 1, "b": 2}));

        let changes = derive_changes(Some(&before), Some(&after));
        assert_eq!(changes, vec!["b: added \"2\"".to_string()]);
    }

    #[test]
    fn test_removed_field() {
        let before = obj(json!({"a": 1, "b": 2}));
        let after = obj(json!({"a": 1}));

        let changes = derive_changes(Some(&before), Some(&after));
        assert_eq!(changes, vec!["b: removed \"2\"".to_string()]);
    }

    #[test]
    fn test_changed_field() {
        let before = obj(json!({"a": 1}));
        let after = obj(json!({"a": 2}));

        let changes = derive_changes(Some(&before), Some(&after));
        assert_eq!(changes, vec!["a: \"1\" → \"2\"".to_string()]);
    }

    #[test]
    fn test_reserved_fields_skipped() {
        let before = obj(json!({
            "id": "one",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z",
            "status": "open"
        }));
        let after = obj(json!({
            "id": "two",
            "created_at": "2026-02-02T00:00:00Z",
            "updated_at": "2026-03-03T00:00:00Z",
            "status": "closed"
        }));

        let changes = derive_changes(Some(&before), Some(&after));
        assert_eq!(changes, vec!["status: \"open\" → \"closed\"".to_string()]);
    }

    #[test]
    fn test_keys_ordered_ascending() {
        let before = obj(json!({"zeta": 1, "alpha": 1, "mid": 1}));
        let after = obj(json!({"zeta": 2, "alpha": 2, "mid": 2}));

        let changes = derive_changes(Some(&before), Some(&after));
        assert_eq!(changes.len(), 3);
        assert!(changes[0].starts_with("alpha:"));
        assert!(changes[1].starts_with("mid:"));
        assert!(changes[2].starts_with("zeta:"));
    }

    #[test]
    fn test_null_and_bool_formatting() {
        let before = obj(json!({"active": true, "notes": null}));
        let after = obj(json!({"active": false, "notes": "call back"}));

        let changes = derive_changes(Some(&before), Some(&after));
        assert!(changes.contains(&"active: \"true\" → \"false\"".to_string()));
        assert!(changes.contains(&"notes: \"null\" → \"call back\"".to_string()));
    }

    #[test]
    fn test_collections_summarized() {
        let before = obj(json!({"tags": [1, 2, 3], "meta": {"a": 1}}));
        let after = obj(json!({"tags": [1, 2], "meta": {"a": 2}}));

        let changes = derive_changes(Some(&before), Some(&after));
        assert!(changes.contains(&"tags: \"[3 items]\" → \"[2 items]\"".to_string()));
        assert!(changes.contains(&"meta: \"[object]\" → \"[object]\"".to_string()));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!("diesel")), "diesel");
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(format_value(&json!({"a": 1})), "[object]");
    }
}
