//! Leveled entry points: compose fields and hand records to the installed sink
pub use crate::errors::{Error, Result};
use crate::{
    caller::CallSite,
    composer::FieldComposer,
    context::LogContext,
    event::EventSink,
    fields::Field,
    levels::{Level, max_level},
    logs::LogRecord,
    prefix::global_prefixes,
    value::Value,
};
use chrono::Utc;
use std::sync::{Arc, PoisonError, RwLock};

static G_DISPATCH: RwLock<Option<Dispatch>> = RwLock::new(None);

pub fn init_event_dispatch(sink: Arc<dyn EventSink>) -> Result<()> {
    {
        let mut guard = G_DISPATCH.write().unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            return Err(Error::AlreadyInitialized());
        }
        *guard = Some(Dispatch { sink: sink.clone() });
    }
    sink.on_startup();
    Ok(())
}

pub fn get_sink() -> Option<Arc<dyn EventSink>> {
    current_dispatch().map(|d| d.sink)
}

/// Uninstalls the dispatch and notifies its sink. Later log calls are dropped
/// until `init_event_dispatch` is called again.
pub fn shutdown_dispatch() {
    let previous = G_DISPATCH
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    if let Some(d) = previous {
        d.sink.on_shutdown();
    }
}

#[inline]
pub fn log_enabled(level: Level) -> bool {
    current_dispatch().is_some_and(|d| d.log_enabled(level))
}

pub fn flush_log_buffer() {
    if let Some(d) = current_dispatch() {
        d.sink.flush();
    }
}

/// Registers process-wide default fields, see [`register_prefixes`].
///
/// `ctx` is not modified nor retained: the pairs become defaults of every
/// later log call of the process, each one replaced by the value a call's own
/// context binds under the same key.
pub fn set_context(_ctx: &LogContext, kvs: &[Value]) -> Result<()> {
    register_prefixes(kvs)
}

/// Appends alternating keys and values to the global prefix registry.
///
/// An odd number of values is rejected: nothing is registered, a warning is
/// logged and the error is returned.
pub fn register_prefixes(kvs: &[Value]) -> Result<()> {
    let res = global_prefixes().register(kvs);
    if let Err(e) = &res
        && let Some(d) = current_dispatch()
    {
        d.emit(Level::Warn, &e.to_string(), &[]);
    }
    res
}

#[track_caller]
pub fn log(level: Level, ctx: &LogContext, kvs: &[Value]) {
    log_with_message(level, ctx, "", kvs);
}

#[track_caller]
pub fn log_with_message(level: Level, ctx: &LogContext, msg: &str, kvs: &[Value]) {
    log_at(level, ctx, msg, kvs, CallSite::locate());
}

/// Logs with an explicit call site, for records reported on behalf of
/// another location (a panic, a bridged logger).
pub fn log_at(level: Level, ctx: &LogContext, msg: &str, kvs: &[Value], call_site: CallSite<'_>) {
    if let Some(d) = current_dispatch() {
        d.log(level, ctx, msg, kvs, call_site);
    }
}

#[track_caller]
pub fn fatal(ctx: &LogContext, kvs: &[Value]) {
    log(Level::Fatal, ctx, kvs);
}

#[track_caller]
pub fn error(ctx: &LogContext, kvs: &[Value]) {
    log(Level::Error, ctx, kvs);
}

#[track_caller]
pub fn warn(ctx: &LogContext, kvs: &[Value]) {
    log(Level::Warn, ctx, kvs);
}

#[track_caller]
pub fn info(ctx: &LogContext, kvs: &[Value]) {
    log(Level::Info, ctx, kvs);
}

#[track_caller]
pub fn debug(ctx: &LogContext, kvs: &[Value]) {
    log(Level::Debug, ctx, kvs);
}

#[track_caller]
pub fn trace(ctx: &LogContext, kvs: &[Value]) {
    log(Level::Trace, ctx, kvs);
}

// the lock is released before calling into the sink, sinks are free to log
fn current_dispatch() -> Option<Dispatch> {
    G_DISPATCH
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[derive(Clone)]
struct Dispatch {
    sink: Arc<dyn EventSink>,
}

impl Dispatch {
    fn log_enabled(&self, level: Level) -> bool {
        level <= max_level() && self.sink.on_log_enabled(level)
    }

    fn log(
        &self,
        level: Level,
        ctx: &LogContext,
        msg: &str,
        kvs: &[Value],
        call_site: CallSite<'_>,
    ) {
        if !self.log_enabled(level) {
            return;
        }
        let fields = match FieldComposer::new(global_prefixes()).compose(ctx, kvs, call_site) {
            Ok(fields) => fields,
            Err(e) => {
                self.emit(Level::Warn, &e.to_string(), &[]);
                Vec::new()
            }
        };
        self.emit(level, msg, &fields);
    }

    fn emit(&self, level: Level, msg: &str, fields: &[Field]) {
        if !self.log_enabled(level) {
            return;
        }
        self.sink.on_log(&LogRecord {
            level,
            time: Utc::now(),
            msg,
            fields,
        });
    }
}
