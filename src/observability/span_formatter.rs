//! Flat JSON span records.
//!
//! Each finished span becomes one self-contained JSON object, written as one line
//! of the span file. Records are meant to be read with `jq` or loaded into a
//! trace viewer after conversion, so IDs are hex strings and attributes are a
//! plain key/value object.
//!
//! ```json
//! {"timestamp":"2026-01-05T10:12:03.114Z","service":"BookFinder","name":"execute_action",
//!  "trace_id":"…","span_id":"…","parent_span_id":null,"duration_ms":0.41,
//!  "attributes":{"action":"FetchPage","page":1},"events":[],"status":"unset"}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use serde_json::{Map, Value as JsonValue};
use std::time::SystemTime;

/// Formats spans as flat JSON records tagged with the service name.
pub struct SpanFormatter {
    service_name: String,
}

impl SpanFormatter {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    /// Formats one span as a single JSON record.
    pub fn format_span(&self, span: &SpanData) -> JsonValue {
        let parent_span_id = if span.parent_span_id == SpanId::INVALID {
            JsonValue::Null
        } else {
            JsonValue::String(format!("{:016x}", span.parent_span_id))
        };

        let duration_ms = span
            .end_time
            .duration_since(span.start_time)
            .map_or(0.0, |d| d.as_secs_f64() * 1000.0);

        let events: Vec<JsonValue> = span
            .events
            .iter()
            .map(|event| {
                serde_json::json!({
                    "timestamp": Self::format_time(event.timestamp),
                    "name": event.name,
                    "attributes": Self::format_attributes(&event.attributes),
                })
            })
            .collect();

        let mut record = serde_json::json!({
            "timestamp": Self::format_time(span.start_time),
            "service": self.service_name,
            "name": span.name,
            "trace_id": format!("{:032x}", span.span_context.trace_id()),
            "span_id": format!("{:016x}", span.span_context.span_id()),
            "parent_span_id": parent_span_id,
            "duration_ms": duration_ms,
            "attributes": Self::format_attributes(&span.attributes),
            "events": events,
            "status": Self::status_label(&span.status),
        });

        if let Status::Error { description } = &span.status {
            record["error"] = JsonValue::String(description.to_string());
        }

        record
    }

    /// RFC 3339 UTC timestamp with millisecond precision.
    fn format_time(time: SystemTime) -> String {
        DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Attributes as a JSON object; later duplicates of a key win.
    fn format_attributes(attributes: &[KeyValue]) -> JsonValue {
        let object: Map<String, JsonValue> = attributes
            .iter()
            .map(|kv| (kv.key.to_string(), Self::format_value(&kv.value)))
            .collect();
        JsonValue::Object(object)
    }

    fn format_value(value: &Value) -> JsonValue {
        match value {
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::I64(i) => JsonValue::from(*i),
            Value::F64(f) => JsonValue::from(*f),
            Value::String(s) => JsonValue::String(s.to_string()),
            Value::Array(_) => JsonValue::String(value.to_string()),
        }
    }

    const fn status_label(status: &Status) -> &'static str {
        match status {
            Status::Unset => "unset",
            Status::Ok => "ok",
            Status::Error { .. } => "error",
        }
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("service_name", &self.service_name)
            .finish()
    }
}
