//! One JSON object per record, fields in composed order
use crate::config::LogRotation;
use crate::rolling_file::RollingFileWriter;
use anyhow::Result;
use kvlog::{event::EventSink, levels::Level, logs::LogRecord};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Appends to a file rotated and pruned by [`RollingFileWriter`].
    pub fn to_file(path: &Path, rotation: LogRotation, max_age: Duration) -> Result<Self> {
        Ok(Self::new(Box::new(RollingFileWriter::new(
            path, rotation, max_age,
        )?)))
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct JsonLine<'a, 'b>(&'a LogRecord<'b>);

impl Serialize for JsonLine<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let record = self.0;
        let mut map = serializer.serialize_map(Some(3 + record.fields.len()))?;
        map.serialize_entry("level", record.level.as_str())?;
        map.serialize_entry(
            "time",
            &record
                .time
                .with_timezone(&chrono::Local)
                .format(TIME_FORMAT)
                .to_string(),
        )?;
        map.serialize_entry("msg", record.msg)?;
        for field in record.fields {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

/// Renders a record as a single JSON line, without the trailing newline.
pub fn format_json_line(record: &LogRecord<'_>) -> serde_json::Result<String> {
    serde_json::to_string(&JsonLine(record))
}

impl EventSink for JsonEventSink {
    fn on_startup(&self) {}

    fn on_shutdown(&self) {
        self.flush();
    }

    fn on_log_enabled(&self, _level: Level) -> bool {
        true
    }

    fn on_log(&self, record: &LogRecord<'_>) {
        let line = match format_json_line(record) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error encoding log record: {e}");
                return;
            }
        };
        let mut writer = self.lock();
        if let Err(e) = writeln!(writer, "{line}") {
            eprintln!("error writing log record: {e}");
        }
    }

    fn flush(&self) {
        if let Err(e) = self.lock().flush() {
            eprintln!("error flushing log records: {e}");
        }
    }
}
