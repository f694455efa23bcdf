use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A raw span record as read from a trace export.
///
/// Fields are kept as an open JSON object so that nothing is coerced on ingest.
/// A non-object element of the input array becomes a span with no fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct Span {
    fields: Map<String, Value>,
}

impl Span {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn service(&self) -> Option<String> {
        self.get("service").and_then(scalar_text)
    }

    /// Attribute bag of the span, if it carries one as a JSON object.
    pub fn attributes(&self) -> Option<&Map<String, Value>> {
        self.get("attributes").and_then(Value::as_object)
    }

    pub fn attr_text(&self, key: &str) -> Option<String> {
        self.attributes()
            .and_then(|attrs| attrs.get(key))
            .and_then(scalar_text)
    }
}

impl From<Value> for Span {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

impl From<Span> for Value {
    fn from(span: Span) -> Self {
        Value::Object(span.fields)
    }
}

/// A span projected onto the retained field set.
///
/// `None` fields are left out of the serialized record; an explicit JSON `null`
/// in the source survives as `Some(Value::Null)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReducedSpan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<IndexMap<String, Value>>,
}

impl From<ReducedSpan> for Span {
    fn from(reduced: ReducedSpan) -> Self {
        let mut fields = Map::new();
        let scalars = [
            ("service", reduced.service),
            ("trace_id", reduced.trace_id),
            ("id", reduced.id),
            ("parent_id", reduced.parent_id),
            ("name", reduced.name),
            ("timestamp", reduced.timestamp),
            ("duration", reduced.duration),
            ("status", reduced.status),
        ];
        for (key, value) in scalars {
            if let Some(value) = value {
                fields.insert(key.to_string(), value);
            }
        }
        if let Some(attributes) = reduced.attributes {
            fields.insert(
                "attributes".to_string(),
                Value::Object(attributes.into_iter().collect()),
            );
        }
        Self { fields }
    }
}

/// Renders a scalar attribute value as text.
///
/// Empty strings, zero, `false`, `null`, arrays and objects yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(number_text(n)),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

// Integral floats such as `8080.0` render without the fraction.
fn number_text(n: &Number) -> String {
    if n.is_f64()
        && let Some(f) = n.as_f64()
        && f.fract() == 0.0
        && f.abs() < MAX_SAFE_INTEGER
    {
        return (f as i64).to_string();
    }
    n.to_string()
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;
