//! OTLP JSON span formatter.
//!
//! Each exported batch becomes one self-contained OTLP JSON document, so the
//! trace file can be replayed line by line into any OTLP-compatible viewer.

use std::time::{Duration, SystemTime};

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};

/// Formats span batches under one resource and instrumentation scope.
///
/// The resource and scope are fixed for the life of the formatter; only the
/// spans change from batch to batch.
pub struct SpanFormatter {
    /// Service metadata emitted as `resource.attributes`.
    resource: Resource,
    /// Instrumentation scope name.
    scope: &'static str,
}

impl SpanFormatter {
    /// Creates a formatter.
    ///
    /// # Parameters
    ///
    /// * `resource` - Resource attributes copied into every batch
    /// * `scope` - Instrumentation scope name, e.g. `"yamiyume"`
    pub const fn new(resource: Resource, scope: &'static str) -> Self {
        Self { resource, scope }
    }

    /// Formats a batch as an OTLP JSON document.
    ///
    /// ```json
    /// {
    ///   "resourceSpans": [{
    ///     "resource": {"attributes": [{"key": "service.name", "value": {"stringValue": "yamiyume"}}]},
    ///     "scopeSpans": [{"scope": {"name": "yamiyume"}, "spans": [...]}]
    ///   }]
    /// }
    /// ```
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(k, v)| json!({ "key": k.to_string(), "value": format_value(v) }))
            .collect();

        let spans: Vec<JsonValue> = batch.iter().map(format_span).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attrs },
                "scopeSpans": [{
                    "scope": { "name": self.scope, "version": env!("CARGO_PKG_VERSION") },
                    "spans": spans
                }]
            }]
        })
    }
}

/// Converts one span to its OTLP JSON form.
///
/// # Format
///
/// - `traceId` / `spanId`: lowercase hex, 32 and 16 digits
/// - `parentSpanId`: empty string for root spans
/// - `kind`: OTLP enum code, see `span_kind_code`
/// - times: nanoseconds since the epoch as decimal strings
/// - `status.code`: 0 unset, 1 ok, 2 error
fn format_span(span: &SpanData) -> JsonValue {
    let (status_code, status_message) = format_status(&span.status);
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": span_kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": format_attributes(&span.attributes),
        "events": span.events.iter().map(format_event).collect::<Vec<_>>(),
        "links": span.links.iter().map(format_link).collect::<Vec<_>>(),
        "status": { "code": status_code, "message": status_message },
    })
}

/// Nanoseconds since the epoch, as a string the way OTLP JSON encodes them.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

/// OTLP `SpanKind` code. 0 (unspecified) is never produced.
const fn span_kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn format_attributes(attributes: &[KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| json!({ "key": kv.key.to_string(), "value": format_value(&kv.value) }))
        .collect()
}

/// OTLP `AnyValue`. 64-bit integers travel as strings; arrays are flattened
/// to their display form.
fn format_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(_) => json!({ "stringValue": value.to_string() }),
    }
}

fn format_event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": format_attributes(&event.attributes),
    })
}

fn format_link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": format_attributes(&link.attributes),
    })
}

fn format_status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").field("scope", &self.scope).finish_non_exhaustive()
    }
}
