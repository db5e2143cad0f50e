use super::EventSink;
use crate::{
    levels::{Level, LevelFilter},
    logs::{LogRecord, OwnedLogRecord},
};
use std::sync::{Mutex, PoisonError};

pub struct MemSinkState {
    pub started: bool,
    pub shut_down: bool,
    pub records: Vec<OwnedLogRecord>,
}

/// for tests where we want to inspect the collected data
pub struct InMemorySink {
    pub state: Mutex<MemSinkState>,
    max_level: LevelFilter,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::with_max_level(LevelFilter::Trace)
    }

    pub fn with_max_level(max_level: LevelFilter) -> Self {
        let state = MemSinkState {
            started: false,
            shut_down: false,
            records: Vec::new(),
        };
        Self {
            state: Mutex::new(state),
            max_level,
        }
    }

    pub fn records(&self) -> Vec<OwnedLogRecord> {
        self.lock().records.clone()
    }

    pub fn take_records(&self) -> Vec<OwnedLogRecord> {
        std::mem::take(&mut self.lock().records)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemSinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for InMemorySink {
    fn on_startup(&self) {
        self.lock().started = true;
    }

    fn on_shutdown(&self) {
        self.lock().shut_down = true;
    }

    fn on_log_enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }

    fn on_log(&self, record: &LogRecord<'_>) {
        self.lock().records.push(OwnedLogRecord::from(record));
    }
}
