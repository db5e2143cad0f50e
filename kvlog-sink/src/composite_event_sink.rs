use kvlog::{
    event::{BoxedEventSink, EventSink},
    levels::{Level, LevelFilter},
    logs::LogRecord,
};

/// Fans records out to several sinks, each with its own maximum level.
pub struct CompositeSink {
    sinks: Vec<(LevelFilter, BoxedEventSink)>,
}

impl CompositeSink {
    /// Sets the global max level to `max_level_override`, or to the most
    /// verbose level accepted by any of the sinks.
    pub fn new(
        sinks: Vec<(LevelFilter, BoxedEventSink)>,
        max_level_override: Option<LevelFilter>,
    ) -> Self {
        if let Some(max_level) = max_level_override {
            kvlog::levels::set_max_level(max_level);
        } else {
            let max_level = sinks
                .iter()
                .map(|(level_filter, _)| *level_filter)
                .max()
                .unwrap_or(LevelFilter::Off);
            kvlog::levels::set_max_level(max_level);
        }
        Self { sinks }
    }
}

impl EventSink for CompositeSink {
    fn on_startup(&self) {
        self.sinks.iter().for_each(|(_, sink)| sink.on_startup());
    }

    fn on_shutdown(&self) {
        self.sinks.iter().for_each(|(_, sink)| sink.on_shutdown());
    }

    fn on_log_enabled(&self, level: Level) -> bool {
        // The log is enabled if any of the sinks are enabled
        // If the sinks vec is empty `false` will be returned
        self.sinks
            .iter()
            .any(|(max_level, sink)| level <= *max_level && sink.on_log_enabled(level))
    }

    fn on_log(&self, record: &LogRecord<'_>) {
        self.sinks.iter().for_each(|(max_level, sink)| {
            if record.level <= *max_level && sink.on_log_enabled(record.level) {
                sink.on_log(record);
            }
        });
    }

    fn flush(&self) {
        self.sinks.iter().for_each(|(_, sink)| sink.flush());
    }
}
