use kvlog::{
    event::EventSink,
    fields::Field,
    levels::Level,
    logs::LogRecord,
    value::Value,
};
use std::fmt::Write;

// Based on simple logger
#[cfg(feature = "colored")]
use colored::Colorize;

/// Human readable console output: `<time> <LEVEL> <msg> key=value ...`
pub struct LocalEventSink {
    /// Control how timestamps are displayed.
    ///
    /// This field is only available if the `timestamps` feature is enabled.
    #[cfg(feature = "timestamps")]
    timestamps: bool,

    /// Whether to use color output or not.
    ///
    /// This field is only available if the `color` feature is enabled.
    #[cfg(feature = "colored")]
    colors: bool,
}

impl LocalEventSink {
    /// Creates a new `LocalEventSink`.
    ///
    /// Initializes the sink with default settings for timestamps and colors.
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "timestamps")]
            timestamps: true,
            #[cfg(feature = "colored")]
            colors: true,
        }
    }

    #[must_use]
    #[cfg(feature = "colored")]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    #[cfg(feature = "timestamps")]
    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    fn level_string(&self, level: Level) -> String {
        #[cfg(feature = "colored")]
        {
            if self.colors {
                return match level {
                    Level::Fatal => level.to_string().red().to_string(),
                    Level::Error => level.to_string().red().to_string(),
                    Level::Warn => level.to_string().yellow().to_string(),
                    Level::Info => level.to_string().cyan().to_string(),
                    Level::Debug => level.to_string().purple().to_string(),
                    Level::Trace => level.to_string().normal().to_string(),
                };
            }
        }
        level.to_string()
    }

    pub fn format_record(&self, record: &LogRecord<'_>) -> String {
        #[cfg(feature = "timestamps")]
        let timestamp = if self.timestamps {
            format!("{} ", record.time.to_rfc3339())
        } else {
            String::new()
        };
        #[cfg(not(feature = "timestamps"))]
        let timestamp = String::new();

        let level_string = self.level_string(record.level);
        let mut message = format!("{timestamp}{level_string:<5}");
        if !record.msg.is_empty() {
            message.push(' ');
            message.push_str(record.msg);
        }
        if !record.fields.is_empty() {
            message.push(' ');
            message.push_str(&format_fields(record.fields));
        }
        message
    }
}

impl Default for LocalEventSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `name=value` pairs separated by spaces, quoting strings that are
/// empty or contain whitespace, quotes or `=`.
pub fn format_fields(fields: &[Field]) -> String {
    let mut buffer = String::new();
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            buffer.push(' ');
        }
        // writing to a String never fails
        let _ = match &field.value {
            Value::Str(s) if needs_quotes(s) => write!(buffer, "{}={s:?}", field.name),
            value => write!(buffer, "{}={value}", field.name),
        };
    }
    buffer
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty() || s.chars().any(|c| c.is_whitespace() || c == '"' || c == '=')
}

impl EventSink for LocalEventSink {
    fn on_startup(&self) {}
    fn on_shutdown(&self) {}

    fn on_log_enabled(&self, _level: Level) -> bool {
        // reaching here we accept everything
        true
    }

    fn on_log(&self, record: &LogRecord<'_>) {
        let message = self.format_record(record);

        #[cfg(not(feature = "stderr"))]
        println!("{message}");

        #[cfg(feature = "stderr")]
        eprintln!("{message}");
    }
}
