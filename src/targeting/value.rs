// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::borrow::Cow;

/// String form of a fact value used for `path=value` comparisons.
///
/// Strings compare as-is. Everything else compares through its compact JSON
/// text, so `3`, `true` and `null` match the literals `3`, `true` and `null`.
pub fn normalize(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Whether a present value counts as "set" for a bare `matches("path")`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize() {
        let cases = vec![
            (json!("linux"), "linux"),
            (json!(3), "3"),
            (json!(1.5), "1.5"),
            (json!(true), "true"),
            (json!(null), "null"),
            (json!([1, 2]), "[1,2]"),
            (json!({"a": 1}), r#"{"a":1}"#),
        ];

        for (value, expected) in cases {
            assert_eq!(normalize(&value), expected, "normalizing {}", value);
        }
    }

    #[test]
    fn test_truthiness() {
        let falsy = vec![json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})];
        let truthy = vec![json!(true), json!(1), json!(-2.5), json!("x"), json!([0]), json!({"a": null})];

        for value in falsy {
            assert!(!is_truthy(&value), "{} should be falsy", value);
        }
        for value in truthy {
            assert!(is_truthy(&value), "{} should be truthy", value);
        }
    }
}
