//! Request-scoped key/value store read by the composer
//!
//! A `LogContext` is immutable: deriving a context with an extra binding
//! returns a new value sharing its parent. Lookups walk from the newest
//! binding to the oldest, so the nearest binding for a key wins.
use crate::trace::SpanContext;
use crate::value::Value;
use opentelemetry::trace::TraceContextExt;
use std::fmt;
use std::sync::Arc;

enum Binding {
    Value { key: String, value: Value },
    Span(SpanContext),
}

struct Node {
    binding: Binding,
    parent: Option<Arc<Node>>,
}

#[derive(Clone, Default)]
pub struct LogContext {
    head: Option<Arc<Node>>,
}

impl LogContext {
    /// Empty context: no values, no span.
    pub fn background() -> Self {
        Self::default()
    }

    fn with_binding(&self, binding: Binding) -> Self {
        Self {
            head: Some(Arc::new(Node {
                binding,
                parent: self.head.clone(),
            })),
        }
    }

    #[must_use]
    pub fn with_value(&self, key: impl fmt::Display, value: impl Into<Value>) -> Self {
        self.with_binding(Binding::Value {
            key: key.to_string(),
            value: value.into(),
        })
    }

    #[must_use]
    pub fn with_span_context(&self, span: SpanContext) -> Self {
        self.with_binding(Binding::Span(span))
    }

    /// Binds the span context of the active span of an OpenTelemetry context.
    #[must_use]
    pub fn with_otel_context(&self, cx: &opentelemetry::Context) -> Self {
        self.with_span_context(cx.span().span_context().clone())
    }

    fn bindings(&self) -> impl Iterator<Item = &Binding> {
        std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
            .map(|node| &node.binding)
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.bindings().find_map(|binding| match binding {
            Binding::Value { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }

    pub fn span_context(&self) -> Option<&SpanContext> {
        self.bindings().find_map(|binding| match binding {
            Binding::Span(span) => Some(span),
            Binding::Value { .. } => None,
        })
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for binding in self.bindings() {
            match binding {
                Binding::Value { key, value } => list.entry(&(key, value)),
                Binding::Span(span) => list.entry(span),
            };
        }
        list.finish()
    }
}
