//! Records handed to event sinks
use crate::fields::Field;
use crate::levels::Level;
use chrono::{DateTime, Utc};

#[derive(Debug)]
pub struct LogRecord<'a> {
    pub level: Level,
    pub time: DateTime<Utc>,
    pub msg: &'a str,
    pub fields: &'a [Field],
}

/// Owned copy of a [`LogRecord`], for sinks that keep records around.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedLogRecord {
    pub level: Level,
    pub time: DateTime<Utc>,
    pub msg: String,
    pub fields: Vec<Field>,
}

impl From<&LogRecord<'_>> for OwnedLogRecord {
    fn from(record: &LogRecord<'_>) -> Self {
        Self {
            level: record.level,
            time: record.time,
            msg: record.msg.to_owned(),
            fields: record.fields.to_vec(),
        }
    }
}
