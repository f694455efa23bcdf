use indexmap::IndexMap;
use serde_json::Value;

use crate::attrs::RETAINED_KEYS;
use crate::model::{ReducedSpan, Span};

pub fn reduce_spans(spans: &[Span]) -> Vec<ReducedSpan> {
    let reduced: Vec<ReducedSpan> = spans.iter().map(reduce_span).collect();
    tracing::info!(spans = reduced.len(), "reduced spans");
    reduced
}

pub fn reduce_span(span: &Span) -> ReducedSpan {
    let field = |name: &str| span.get(name).cloned();

    ReducedSpan {
        service: field("service"),
        trace_id: field("trace_id"),
        id: field("id"),
        parent_id: field("parent_id"),
        name: field("name"),
        timestamp: field("timestamp"),
        duration: field("duration"),
        status: field("status"),
        attributes: span.attributes().map(|attrs| {
            RETAINED_KEYS
                .iter()
                .filter_map(|key| attrs.get(*key).map(|v| (key.to_string(), v.clone())))
                .collect::<IndexMap<String, Value>>()
        }),
    }
}
