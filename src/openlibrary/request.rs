//! Search request descriptor and its context-map encoding.
//!
//! Zellij's `web_request` returns immediately and reports the response later as a
//! `WebRequestResult` event carrying the same `BTreeMap<String, String>` context
//! that was passed in. Everything needed to apply the response (which search it
//! belongs to, which page, append or replace) therefore travels in that map.
//!
//! The map also carries the trace context of the span that issued the request, so
//! the span handling the completion can be linked to it in the exported traces.

use crate::domain::{BookFinderError, Result};
use std::collections::BTreeMap;

/// Marker key identifying requests issued by this plugin.
pub const CONTEXT_SOURCE_KEY: &str = "source";

/// Value stored under [`CONTEXT_SOURCE_KEY`].
pub const CONTEXT_SOURCE: &str = "bookfinder";

const KEY_GENERATION: &str = "generation";
const KEY_QUERY: &str = "query";
const KEY_PAGE: &str = "page";
const KEY_APPEND: &str = "append";
const KEY_ISSUED_AT: &str = "issued_at_ms";
const KEY_TRACE_ID: &str = "trace_id";
const KEY_PARENT_SPAN_ID: &str = "parent_span_id";

/// Tracing context captured when a request is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the issuing span as a hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry trace and span IDs of the current span.
    ///
    /// Returns `None` when no valid span context is active (for instance when
    /// tracing has not been initialized).
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes the captured span the remote parent of spans created while the
    /// returned guard is alive.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// One page fetch issued against the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Monotonic request number; only the latest one is applied.
    pub generation: u64,
    /// Effective (trimmed, defaulted) query.
    pub query: String,
    /// One-based page number.
    pub page: u32,
    /// Append to the current results instead of replacing them.
    pub append: bool,
    /// Issue time in Unix milliseconds, used for latency logging.
    pub issued_at_ms: i64,
    pub trace_context: Option<TraceContext>,
}

impl SearchRequest {
    /// Creates a request stamped with the current time and trace context.
    #[must_use]
    pub fn new(generation: u64, query: String, page: u32, append: bool) -> Self {
        Self {
            generation,
            query,
            page,
            append,
            issued_at_ms: chrono::Utc::now().timestamp_millis(),
            trace_context: TraceContext::from_current(),
        }
    }

    /// The URL to fetch for this request.
    #[must_use]
    pub fn url(&self) -> String {
        super::search_url(&self.query, self.page)
    }

    /// Milliseconds elapsed since the request was issued.
    #[must_use]
    pub fn elapsed_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis() - self.issued_at_ms
    }

    /// Encodes the request as a `web_request` context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_SOURCE_KEY.to_string(), CONTEXT_SOURCE.to_string());
        context.insert(KEY_GENERATION.to_string(), self.generation.to_string());
        context.insert(KEY_QUERY.to_string(), self.query.clone());
        context.insert(KEY_PAGE.to_string(), self.page.to_string());
        context.insert(KEY_APPEND.to_string(), self.append.to_string());
        context.insert(KEY_ISSUED_AT.to_string(), self.issued_at_ms.to_string());
        if let Some(trace) = &self.trace_context {
            context.insert(KEY_TRACE_ID.to_string(), trace.trace_id.clone());
            context.insert(KEY_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }
        context
    }

    /// Returns `true` if the context map was produced by [`Self::to_context`].
    #[must_use]
    pub fn is_own_context(context: &BTreeMap<String, String>) -> bool {
        context.get(CONTEXT_SOURCE_KEY).map(String::as_str) == Some(CONTEXT_SOURCE)
    }

    /// Reads only the generation, for context maps that fail to decode fully.
    #[must_use]
    pub fn generation_from_context(context: &BTreeMap<String, String>) -> Option<u64> {
        parse_field(context, KEY_GENERATION).ok()
    }

    /// Decodes a context map produced by [`Self::to_context`].
    ///
    /// # Errors
    ///
    /// Returns [`BookFinderError::RequestContext`] if a required key is missing or
    /// does not parse.
    pub fn from_context(context: &BTreeMap<String, String>) -> Result<Self> {
        let trace_context = match (context.get(KEY_TRACE_ID), context.get(KEY_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            generation: parse_field(context, KEY_GENERATION)?,
            query: required(context, KEY_QUERY)?.clone(),
            page: parse_field(context, KEY_PAGE)?,
            append: parse_field(context, KEY_APPEND)?,
            issued_at_ms: parse_field(context, KEY_ISSUED_AT)?,
            trace_context,
        })
    }
}

fn required<'a>(context: &'a BTreeMap<String, String>, key: &str) -> Result<&'a String> {
    context
        .get(key)
        .ok_or_else(|| BookFinderError::RequestContext(format!("missing `{key}`")))
}

fn parse_field<T: std::str::FromStr>(context: &BTreeMap<String, String>, key: &str) -> Result<T> {
    let raw = required(context, key)?;
    raw.parse()
        .map_err(|_| BookFinderError::RequestContext(format!("invalid `{key}`: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_survives_the_host_round_trip() {
        let request = SearchRequest {
            generation: 7,
            query: "Data Structures".to_string(),
            page: 3,
            append: true,
            issued_at_ms: 1_700_000_000_000,
            trace_context: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };

        let context = request.to_context();
        assert!(SearchRequest::is_own_context(&context));
        assert_eq!(SearchRequest::from_context(&context).unwrap(), request);
    }

    #[test]
    fn foreign_context_is_not_ours() {
        let mut context = BTreeMap::new();
        context.insert("source".to_string(), "some-other-plugin".to_string());
        assert!(!SearchRequest::is_own_context(&context));
        assert!(!SearchRequest::is_own_context(&BTreeMap::new()));
    }

    #[test]
    fn corrupt_context_is_rejected() {
        let mut context = SearchRequest::new(1, "rust".to_string(), 1, false).to_context();
        context.insert("page".to_string(), "first".to_string());

        let err = SearchRequest::from_context(&context).unwrap_err();
        assert!(matches!(err, BookFinderError::RequestContext(_)));
        assert_eq!(SearchRequest::generation_from_context(&context), Some(1));

        context.remove("generation");
        assert_eq!(SearchRequest::generation_from_context(&context), None);
    }

    #[test]
    fn url_uses_effective_query_and_page() {
        let request = SearchRequest::new(1, "rust".to_string(), 4, true);
        assert!(request.url().ends_with("title=rust&limit=50&page=4"));
    }
}
