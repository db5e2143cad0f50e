//! Builds the ordered field list of one log call
//!
//! Output order:
//! 1. `caller`
//! 2. `trace_id`, `span_id` (always present, possibly empty)
//! 3. explicit key/values, in argument order
//! 4. registered prefixes, in registration order, valued from the context
//!    when it binds the same key
//!
//! Names are unique in the output. A repeated explicit key keeps its first
//! position and takes the last value. Explicit keys win over prefixes, and
//! the derived fields of steps 1 and 2 are never overridden.
use crate::caller::CallSite;
use crate::context::LogContext;
use crate::errors::{Error, Result};
use crate::fields::{CALLER_KEY, Field, FieldList, SPAN_ID_KEY, TRACE_ID_KEY, is_reserved};
use crate::prefix::PrefixRegistry;
use crate::trace;
use crate::value::Value;

pub struct FieldComposer<'a> {
    prefixes: &'a PrefixRegistry,
}

impl<'a> FieldComposer<'a> {
    pub fn new(prefixes: &'a PrefixRegistry) -> Self {
        Self { prefixes }
    }

    /// Fails with [`Error::MalformedKeyValues`] when `kvs` is empty or odd.
    pub fn compose(
        &self,
        ctx: &LogContext,
        kvs: &[Value],
        call_site: CallSite<'_>,
    ) -> Result<FieldList> {
        if kvs.is_empty() || kvs.len() % 2 != 0 {
            return Err(Error::MalformedKeyValues(render_values(kvs)));
        }
        let prefixes = self.prefixes.snapshot();
        let mut fields = Vec::with_capacity(3 + kvs.len() / 2 + prefixes.len());

        fields.push(Field::new(CALLER_KEY, call_site.render()));
        let (trace_id, span_id) = trace::resolve(ctx);
        fields.push(Field::new(TRACE_ID_KEY, trace_id));
        fields.push(Field::new(SPAN_ID_KEY, span_id));

        for pair in kvs.chunks_exact(2) {
            let name = pair[0].to_string();
            match fields.iter().position(|f| f.name == name) {
                Some(idx) => {
                    if !is_reserved(&name) {
                        fields[idx].value = pair[1].clone();
                    }
                }
                None => fields.push(Field {
                    name,
                    value: pair[1].clone(),
                }),
            }
        }

        for entry in prefixes.iter() {
            if fields.iter().any(|f| f.name == entry.key) {
                continue;
            }
            let value = ctx.value(&entry.key).unwrap_or(&entry.value).clone();
            fields.push(Field {
                name: entry.key.clone(),
                value,
            });
        }

        Ok(fields)
    }
}

fn render_values(kvs: &[Value]) -> String {
    let rendered: Vec<String> = kvs.iter().map(ToString::to_string).collect();
    format!("[{}]", rendered.join(" "))
}
