//! Distributed trace correlation identifiers
//!
//! Identifiers come from OpenTelemetry span contexts bound to the request
//! context. They are consumed here, never generated.
use crate::context::LogContext;
use crate::errors::{Error, Result};
use opentelemetry::propagation::TextMapPropagator;
use opentelemetry::trace::TraceContextExt;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use std::collections::HashMap;

pub use opentelemetry::trace::{SpanContext, SpanId, TraceFlags, TraceId, TraceState};

const TRACEPARENT_HEADER: &str = "traceparent";

/// Parses a W3C `traceparent` header: `00-<trace-id>-<parent-id>-<flags>`.
///
/// The returned span context is marked remote.
pub fn span_context_from_traceparent(header: &str) -> Result<SpanContext> {
    let carrier = HashMap::from([(TRACEPARENT_HEADER.to_owned(), header.trim().to_owned())]);
    let cx = TraceContextPropagator::new().extract(&carrier);
    let span_context = cx.span().span_context().clone();
    if !span_context.is_valid() {
        return Err(Error::InvalidTraceParent(header.to_owned()));
    }
    Ok(span_context)
}

/// Returns `(trace_id, span_id)` for the context, each empty when absent.
pub fn resolve(ctx: &LogContext) -> (String, String) {
    let Some(span) = ctx.span_context() else {
        return (String::new(), String::new());
    };
    let trace_id = if span.trace_id() != TraceId::INVALID {
        span.trace_id().to_string()
    } else {
        String::new()
    };
    let span_id = if span.span_id() != SpanId::INVALID {
        span.span_id().to_string()
    } else {
        String::new()
    };
    (trace_id, span_id)
}
