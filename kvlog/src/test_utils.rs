use crate::dispatch::{init_event_dispatch, shutdown_dispatch};
use crate::event::in_memory_sink::InMemorySink;
use std::sync::Arc;

/// RAII guard for in-memory logging that handles cleanup
///
/// This guard automatically calls shutdown_dispatch() when dropped, ensuring
/// proper cleanup between tests.
///
/// # Important
/// Tests using this guard MUST be marked with #[serial] since they
/// share global state through init_event_dispatch.
pub struct InMemoryLoggingGuard {
    pub sink: Arc<InMemorySink>,
}

impl Default for InMemoryLoggingGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLoggingGuard {
    pub fn new() -> Self {
        Self::with_sink(InMemorySink::new())
    }

    pub fn with_sink(sink: InMemorySink) -> Self {
        let sink = Arc::new(sink);
        init_event_dispatch(sink.clone()).expect("Failed to initialize event dispatch");
        Self { sink }
    }
}

impl Drop for InMemoryLoggingGuard {
    fn drop(&mut self) {
        shutdown_dispatch();
    }
}

/// Initialize in-memory logging for unit tests
///
/// # Important
/// Tests using this function MUST be marked with #[serial] since they
/// share global state through init_event_dispatch.
///
/// # Example
/// ```rust
/// use kvlog::test_utils::init_in_memory_logging;
///
/// // In your test file:
/// // #[test]
/// // #[serial]
/// fn test_example() {
///     let guard = init_in_memory_logging();
///     // Use logging macros: info!(), warn!(), etc.
///     // Verify results in guard.sink.records()
///     // Automatic cleanup when guard is dropped
/// }
/// ```
pub fn init_in_memory_logging() -> InMemoryLoggingGuard {
    InMemoryLoggingGuard::new()
}
