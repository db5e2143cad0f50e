//! RAII guards installing and tearing down the log dispatch
use crate::dispatch::{flush_log_buffer, init_event_dispatch, shutdown_dispatch};
use crate::errors::Result;
use crate::event::EventSink;
use std::sync::Arc;

/// Keeps the dispatch installed for as long as it lives.
///
/// Libraries should not create one, applications create it once near the
/// start of `main`.
pub struct LoggingSystemGuard {}

impl LoggingSystemGuard {
    pub fn new(sink: Arc<dyn EventSink>) -> Result<Self> {
        init_event_dispatch(sink)?;
        Ok(Self {})
    }
}

impl std::ops::Drop for LoggingSystemGuard {
    fn drop(&mut self) {
        shutdown_logging();
    }
}

pub fn shutdown_logging() {
    flush_log_buffer();
    shutdown_dispatch();
}
