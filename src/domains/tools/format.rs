//! Response envelope and payload formatting.
//!
//! A payload is classified once into a [`PayloadShape`] and each shape has a
//! single rendering rule.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::handlers::OperationResult;

/// Uniform wire structure returned by every tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub content: Vec<TextContent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,

    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<EnvelopeMeta>,
}

/// A single `{"type": "text", "text": ...}` content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Metadata attached to successful calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeMeta {
    pub tool_name: String,
    pub result_type: String,
    pub has_data: bool,
    pub timestamp: String,
}

impl ResponseEnvelope {
    /// Build the envelope for a completed operation.
    pub fn from_result(tool_name: &str, result: &OperationResult) -> Self {
        match result {
            OperationResult::Failure(message) => Self::business_error(message),
            OperationResult::Success(payload) => Self::success(tool_name, payload),
        }
    }

    /// Successful protocol response carrying a semantic failure.
    pub fn business_error(message: &str) -> Self {
        Self {
            content: vec![TextContent::new(format!("Error: {message}"))],
            is_error: Some(true),
            meta: None,
        }
    }

    fn success(tool_name: &str, payload: &Value) -> Self {
        let shape = PayloadShape::classify(payload);
        Self {
            content: vec![TextContent::new(shape.render())],
            is_error: None,
            meta: Some(EnvelopeMeta {
                tool_name: tool_name.to_string(),
                result_type: result_type(payload).to_string(),
                has_data: shape.has_data(),
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            }),
        }
    }

    /// Text of the first content item.
    pub fn text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or("")
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}

/// Classification of a success payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayloadShape<'a> {
    /// A string, used verbatim.
    Text(&'a str),
    /// A number, boolean or null.
    Scalar(&'a Value),
    /// A JSON array.
    Sequence(&'a [Value]),
    /// An object whose `data` field is an array.
    RecordWithData {
        record: &'a Map<String, Value>,
        count: usize,
    },
    /// Any other object.
    Record(&'a Map<String, Value>),
}

impl<'a> PayloadShape<'a> {
    pub fn classify(payload: &'a Value) -> Self {
        match payload {
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::Sequence(items),
            Value::Object(record) => match record.get("data") {
                Some(Value::Array(data)) => Self::RecordWithData {
                    record,
                    count: data.len(),
                },
                _ => Self::Record(record),
            },
            Value::Null | Value::Bool(_) | Value::Number(_) => Self::Scalar(payload),
        }
    }

    /// Human-readable text for this payload.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => (*s).to_string(),
            Self::Scalar(v) => v.to_string(),
            Self::Sequence(items) => {
                format!("Found {} items:\n{}", items.len(), pretty(*items))
            }
            Self::RecordWithData { record, count } => {
                format!("Found {} items:\n{}", count, pretty(*record))
            }
            Self::Record(record) => pretty(*record),
        }
    }

    /// True for arrays and for objects that carry a `data` key.
    pub fn has_data(&self) -> bool {
        match self {
            Self::Sequence(_) | Self::RecordWithData { .. } => true,
            Self::Record(record) => record.contains_key("data"),
            Self::Text(_) | Self::Scalar(_) => false,
        }
    }
}

/// Name of the payload's type as reported in `_meta.resultType`.
fn result_type(payload: &Value) -> &'static str {
    match payload {
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null | Value::Array(_) | Value::Object(_) => "object",
    }
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(payload: Value) -> String {
        PayloadShape::classify(&payload).render()
    }

    #[test]
    fn test_string_is_verbatim() {
        assert_eq!(render(json!("hello\nworld")), "hello\nworld");
    }

    #[test]
    fn test_scalars_use_json_text() {
        assert_eq!(render(json!(42)), "42");
        assert_eq!(render(json!(1.5)), "1.5");
        assert_eq!(render(json!(true)), "true");
        assert_eq!(render(Value::Null), "null");
    }

    #[test]
    fn test_array_prefix() {
        let text = render(json!([1, 2, 3]));
        assert!(text.starts_with("Found 3 items:\n"));
        assert_eq!(text, format!("Found 3 items:\n{}", "[\n  1,\n  2,\n  3\n]"));
    }

    #[test]
    fn test_data_record_dumps_whole_object() {
        let payload = json!({ "data": [{ "id": 1 }, { "id": 2 }], "meta": { "total": 2 } });
        let text = render(payload.clone());
        let expected = format!(
            "Found 2 items:\n{}",
            serde_json::to_string_pretty(&payload).unwrap()
        );
        assert_eq!(text, expected);
        assert!(text.contains("\"meta\""));
    }

    #[test]
    fn test_plain_record() {
        let payload = json!({ "id": 7, "name": "Shirt" });
        assert_eq!(render(payload.clone()), serde_json::to_string_pretty(&payload).unwrap());
    }

    #[test]
    fn test_data_field_that_is_not_array() {
        let payload = json!({ "data": { "id": 7 } });
        let shape = PayloadShape::classify(&payload);
        assert!(matches!(shape, PayloadShape::Record(_)));
        assert!(shape.has_data());
        assert!(!shape.render().starts_with("Found"));
    }

    #[test]
    fn test_success_envelope_meta() {
        let envelope = ResponseEnvelope::from_result(
            "get_all_products",
            &OperationResult::Success(json!({ "data": [] })),
        );
        assert!(!envelope.is_error());
        let meta = envelope.meta.as_ref().unwrap();
        assert_eq!(meta.tool_name, "get_all_products");
        assert_eq!(meta.result_type, "object");
        assert!(meta.has_data);
        assert!(chrono::DateTime::parse_from_rfc3339(&meta.timestamp).is_ok());
    }

    #[test]
    fn test_result_types() {
        assert_eq!(result_type(&json!("s")), "string");
        assert_eq!(result_type(&json!(1)), "number");
        assert_eq!(result_type(&json!(false)), "boolean");
        assert_eq!(result_type(&json!([])), "object");
        assert_eq!(result_type(&Value::Null), "object");
    }

    #[test]
    fn test_business_error_envelope() {
        let envelope =
            ResponseEnvelope::from_result("x", &OperationResult::failure("HTTP 500: boom"));
        assert!(envelope.is_error());
        assert_eq!(envelope.text(), "Error: HTTP 500: boom");
        assert!(envelope.meta.is_none());
    }

    #[test]
    fn test_wire_format() {
        let envelope = ResponseEnvelope::business_error("nope");
        let wire = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            wire,
            json!({ "content": [{ "type": "text", "text": "Error: nope" }], "isError": true })
        );

        let ok = ResponseEnvelope::from_result("t", &OperationResult::Success(json!("hi")));
        let wire = serde_json::to_value(&ok).unwrap();
        assert!(wire.get("isError").is_none());
        assert_eq!(wire["_meta"]["toolName"], "t");
        assert_eq!(wire["_meta"]["hasData"], false);
    }
}
