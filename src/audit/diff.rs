//! Human-readable diffs for audit entries

use serde_json::Value;

/// Bookkeeping fields left out of diff summaries
const IGNORED_FIELDS: &[&str] = &["updated_at", "created_at"];

/// Summarize top-level field changes between two JSON values
///
/// Returns `None` when nothing worth reporting changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            changes
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_added_removed() {
        let before = json!({"Necesidades": 50.0, "Gustos": 30.0, "Ahorro": 20.0});
        let after = json!({"Necesidades": 70.0, "Gustos": 30.0, "Inversion": 0.0});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("Necesidades: 50.0 -> 70.0"));
        assert!(diff.contains("Ahorro: 20.0 -> (removed)"));
        assert!(diff.contains("Inversion: (added) -> 0.0"));
        assert!(!diff.contains("Gustos"));
    }

    #[test]
    fn test_timestamps_are_ignored() {
        let before = json!({"name": "Salary", "updated_at": "2025-01-01T00:00:00Z"});
        let after = json!({"name": "Salary", "updated_at": "2025-02-01T00:00:00Z"});
        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_scalars_and_long_strings() {
        assert_eq!(generate_diff(&json!(1), &json!(2)).unwrap(), "1 -> 2");
        assert!(generate_diff(&json!("a"), &json!("a")).is_none());

        let long = "x".repeat(80);
        let diff = generate_diff(&json!({"notes": ""}), &json!({"notes": long})).unwrap();
        assert!(diff.ends_with("...\""));
    }
}
