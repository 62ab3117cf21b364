//! Lenient accessors for the provider's loosely-typed JSON.
//!
//! The feed mixes numbers and numeric strings for the same field across
//! endpoints, so every accessor accepts both and returns `None` (or an empty
//! value) instead of failing.

use serde_json::Value;

pub fn list(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Like [`text`], with "-" standing in for a missing or empty value
pub fn text_or_dash(value: Option<&Value>) -> String {
    let text = text(value);
    if text.trim().is_empty() {
        "-".to_string()
    } else {
        text
    }
}

pub fn uint(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn float(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn boolean(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_and_numeric_strings() {
        let record = json!({"a": 20161105071221u64, "b": "42", "c": " 7 ", "d": null, "e": 1.5});

        assert_eq!(uint(record.get("a")), Some(20161105071221));
        assert_eq!(uint(record.get("b")), Some(42));
        assert_eq!(int(record.get("c")), Some(7));
        assert_eq!(uint(record.get("d")), None);
        assert_eq!(uint(record.get("missing")), None);
        assert_eq!(float(record.get("e")), Some(1.5));
        assert_eq!(float(record.get("b")), Some(42.0));
    }

    #[test]
    fn test_text() {
        let record = json!({"s": "NL A", "n": 3, "empty": "", "null": null});

        assert_eq!(text(record.get("s")), "NL A");
        assert_eq!(text(record.get("n")), "3");
        assert_eq!(text(record.get("null")), "");
        assert_eq!(text_or_dash(record.get("empty")), "-");
        assert_eq!(text_or_dash(record.get("missing")), "-");
    }

    #[test]
    fn test_boolean_and_list() {
        let record = json!({"t": true, "one": 1, "s": "false", "items": [1, 2]});

        assert_eq!(boolean(record.get("t")), Some(true));
        assert_eq!(boolean(record.get("one")), Some(true));
        assert_eq!(boolean(record.get("s")), Some(false));
        assert_eq!(list(record.get("items")).len(), 2);
        assert!(list(record.get("t")).is_empty());
        assert!(list(None).is_empty());
    }
}
