//! Sinks and bootstrap for kvlog
//!
//! Builds the composite sink that encodes and writes the records composed by
//! `kvlog`, installs it as the process dispatch and registers the default
//! prefixes.

// crate-specific lint exceptions:
#![allow(clippy::missing_errors_doc, clippy::new_without_default)]

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

pub mod composite_event_sink;
pub mod config;
pub mod json_event_sink;
pub mod local_event_sink;
pub mod rolling_file;

use kvlog::dispatch::register_prefixes;
use kvlog::event::{BoxedEventSink, EventSink};
use kvlog::guards::LoggingSystemGuard;
use kvlog::levels::LevelFilter;
use kvlog::panic_hook::init_panic_hook;
use kvlog::value::Value;

use composite_event_sink::CompositeSink;
use config::LogConfig;
use json_event_sink::JsonEventSink;
use local_event_sink::LocalEventSink;

pub struct LoggerGuardBuilder {
    config: Option<LogConfig>,
    max_level_override: Option<LevelFilter>,
    console_sink_enabled: bool,
    extra_sinks: HashMap<TypeId, (LevelFilter, BoxedEventSink)>,
    prefixes: Vec<Value>,
    install_panic_hook: bool,
}

impl Default for LoggerGuardBuilder {
    fn default() -> Self {
        Self {
            config: None,
            max_level_override: None,
            console_sink_enabled: true,
            extra_sinks: HashMap::default(),
            prefixes: Vec::new(),
            install_panic_hook: false,
        }
    }
}

impl LoggerGuardBuilder {
    // Only one sink per type
    #[must_use]
    pub fn add_sink<Sink>(mut self, max_level: LevelFilter, sink: Sink) -> Self
    where
        Sink: EventSink + 'static,
    {
        let type_id = TypeId::of::<Sink>();

        self.extra_sinks
            .entry(type_id)
            .or_insert_with(|| (max_level, Box::new(sink)));

        self
    }

    /// Replaces the configuration read from the environment.
    #[must_use]
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Programmatic override
    #[must_use]
    pub fn with_max_level_override(mut self, level_filter: LevelFilter) -> Self {
        self.max_level_override = Some(level_filter);
        self
    }

    #[must_use]
    pub fn with_console_sink_enabled(mut self, enabled: bool) -> Self {
        self.console_sink_enabled = enabled;
        self
    }

    /// Default field registered when the guard is built.
    #[must_use]
    pub fn with_prefix(mut self, key: impl Into<Value>, value: impl Into<Value>) -> Self {
        self.prefixes.push(key.into());
        self.prefixes.push(value.into());
        self
    }

    #[must_use]
    pub fn with_panic_hook(mut self, enabled: bool) -> Self {
        self.install_panic_hook = enabled;
        self
    }

    pub fn build(self) -> anyhow::Result<LoggerGuard> {
        let guard = {
            lazy_static::lazy_static! {
                static ref GLOBAL_WEAK_GUARD: Mutex<Weak<LoggingSystemGuard>> = Mutex::new(Weak::new());
            }
            let mut weak_guard = GLOBAL_WEAK_GUARD
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let weak = &mut *weak_guard;

            if let Some(arc) = weak.upgrade() {
                arc
            } else {
                let config = self.config.unwrap_or_else(LogConfig::from_env);
                let mut sinks: Vec<(LevelFilter, BoxedEventSink)> = vec![];
                if self.console_sink_enabled {
                    let console: BoxedEventSink = if config.prod {
                        Box::new(JsonEventSink::stdout())
                    } else {
                        Box::new(LocalEventSink::new())
                    };
                    sinks.push((config.level, console));
                }
                if let Some(path) = &config.path {
                    sinks.push((
                        config.level,
                        Box::new(JsonEventSink::to_file(
                            path,
                            config.rotation,
                            config.max_age,
                        )?),
                    ));
                }
                let mut extra_sinks = self.extra_sinks.into_values().collect();
                sinks.append(&mut extra_sinks);

                let sink: BoxedEventSink =
                    Box::new(CompositeSink::new(sinks, self.max_level_override));
                let arc = Arc::new(LoggingSystemGuard::new(sink.into())?);

                if self.install_panic_hook {
                    init_panic_hook();
                }

                *weak = Arc::downgrade(&arc);
                arc
            }
        };
        register_prefixes(&self.prefixes)?;
        Ok(LoggerGuard { _guard: guard })
    }
}

/// Keeps logging installed; the dispatch is torn down when the last guard is dropped.
pub struct LoggerGuard {
    _guard: Arc<LoggingSystemGuard>,
}

impl LoggerGuard {
    pub fn new() -> anyhow::Result<Self> {
        LoggerGuardBuilder::default().build()
    }
}
