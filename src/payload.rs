//! Decoded service payloads and their display form
//!
//! The service is not consistent about list elements: some arrive as row
//! objects, some as strings that still contain encoded JSON. Rendering
//! tolerates both and never fails.

use serde_json::{Map, Number, Value};

/// Scalar JSON values
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    Text(String),
}

/// A decoded response body, tagged by shape
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Sequence(Vec<Value>),
    Structured(Map<String, Value>),
    Scalar(Scalar),
    Null,
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Payload::Sequence(items),
            Value::Object(map) => Payload::Structured(map),
            Value::Bool(b) => Payload::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Payload::Scalar(Scalar::Number(n)),
            Value::String(s) => Payload::Scalar(Scalar::Text(s)),
            Value::Null => Payload::Null,
        }
    }
}

impl Payload {
    /// Truthiness used for membership answers
    pub fn is_truthy(&self) -> bool {
        match self {
            Payload::Scalar(Scalar::Bool(b)) => *b,
            Payload::Scalar(Scalar::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
            Payload::Scalar(Scalar::Text(s)) => !s.is_empty(),
            Payload::Sequence(_) | Payload::Structured(_) => true,
            Payload::Null => false,
        }
    }

    /// Render for the results panel
    pub fn render(&self) -> String {
        match self {
            Payload::Sequence(items) => items
                .iter()
                .map(render_element)
                .collect::<Vec<_>>()
                .join("\n"),
            Payload::Structured(map) => serde_json::to_string_pretty(map)
                .unwrap_or_else(|_| Value::Object(map.clone()).to_string()),
            Payload::Scalar(Scalar::Bool(b)) => b.to_string(),
            Payload::Scalar(Scalar::Number(n)) => n.to_string(),
            Payload::Scalar(Scalar::Text(s)) => s.clone(),
            Payload::Null => "null".to_string(),
        }
    }
}

/// Render any decoded value
pub fn render(value: &Value) -> String {
    Payload::from(value.clone()).render()
}

fn render_element(item: &Value) -> String {
    match item {
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(decoded) => row_or_value(&decoded),
            Err(_) => raw.clone(),
        },
        other => row_or_value(other),
    }
}

/// A `row` that is not non-empty text counts as absent
fn row_or_value(value: &Value) -> String {
    match value.get("row") {
        Some(Value::String(row)) if !row.is_empty() => row.clone(),
        _ => plain_text(value),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_strings_join_with_newlines() {
        assert_eq!(render(&json!(["a", "b"])), "a\nb");
    }

    #[test]
    fn test_encoded_row_objects_are_unwrapped() {
        assert_eq!(render(&json!([r#"{"row":"x"}"#])), "x");
    }

    #[test]
    fn test_mixed_sequence_keeps_order() {
        let payload = json!([
            "plain",
            r#"{"row":"encoded"}"#,
            {"row": "object"},
            r#"{"other":1}"#,
            "\"quoted\"",
            7
        ]);
        assert_eq!(
            render(&payload),
            "plain\nencoded\nobject\n{\"other\":1}\nquoted\n7"
        );
    }

    #[test]
    fn test_structured_is_pretty_printed() {
        let out = render(&json!({"status": "success"}));
        assert_eq!(out, "{\n  \"status\": \"success\"\n}");
    }

    #[test]
    fn test_scalars_and_null() {
        assert_eq!(render(&json!(true)), "true");
        assert_eq!(render(&json!(42)), "42");
        assert_eq!(render(&json!("text")), "text");
        assert_eq!(render(&Value::Null), "null");
        assert_eq!(render(&json!([])), "");
    }

    #[test]
    fn test_render_is_repeatable() {
        let payload = Payload::from(json!(["b", r#"{"row":"a"}"#, {"k": [1, 2]}]));
        assert_eq!(payload.render(), payload.render());
    }

    #[test]
    fn test_truthiness() {
        assert!(Payload::from(json!(true)).is_truthy());
        assert!(!Payload::from(json!(false)).is_truthy());
        assert!(!Payload::from(json!(0)).is_truthy());
        assert!(!Payload::from(json!("")).is_truthy());
        assert!(!Payload::Null.is_truthy());
        assert!(Payload::from(json!([])).is_truthy());
    }

    #[test]
    fn test_missing_or_null_row_falls_back_to_element() {
        assert_eq!(render(&json!([r#"{"row":null}"#])), r#"{"row":null}"#);
        assert_eq!(render(&json!([{"row": ""}])), r#"{"row":""}"#);
        assert_eq!(render(&json!([{"row": 7}])), r#"{"row":7}"#);
    }
}
