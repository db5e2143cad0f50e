//! Rendered fields attached to a log record
use crate::value::Value;
use serde::Serialize;

/// Name of the field holding the application's call site.
pub const CALLER_KEY: &str = "caller";
/// Name of the field holding the distributed trace identifier.
pub const TRACE_ID_KEY: &str = "trace_id";
/// Name of the field holding the span identifier.
pub const SPAN_ID_KEY: &str = "span_id";

/// Fields derived by the composer, never overridden by arguments or prefixes.
pub const RESERVED_KEYS: [&str; 3] = [CALLER_KEY, TRACE_ID_KEY, SPAN_ID_KEY];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered fields produced for one log call, unique by name.
pub type FieldList = Vec<Field>;

pub fn is_reserved(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

pub fn field_get<'a>(fields: &'a [Field], name: &str) -> Option<&'a Value> {
    fields.iter().find(|f| f.name == name).map(|f| &f.value)
}
