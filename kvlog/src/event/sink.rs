use crate::{levels::Level, logs::LogRecord};

pub type BoxedEventSink = Box<dyn EventSink>;

/// interface needed by the dispatch module to send out log records
pub trait EventSink: Send + Sync {
    fn on_startup(&self);
    fn on_shutdown(&self);

    fn on_log_enabled(&self, level: Level) -> bool;
    fn on_log(&self, record: &LogRecord<'_>);

    /// Writes out anything buffered so far.
    fn flush(&self) {}
}

/// for tests where the data can be dropped
pub struct NullEventSink {}

impl EventSink for NullEventSink {
    fn on_startup(&self) {}
    fn on_shutdown(&self) {}

    fn on_log_enabled(&self, _: Level) -> bool {
        false
    }
    fn on_log(&self, _record: &LogRecord<'_>) {}
}
