//! Settings consumed when the sinks are built
use kvlog::levels::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;
use tracing_appender::rolling::Rotation;

pub const LEVEL_ENV_VAR: &str = "KVLOG_LEVEL";
pub const PATH_ENV_VAR: &str = "KVLOG_PATH";
pub const PROD_ENV_VAR: &str = "KVLOG_PROD";
pub const MAX_AGE_ENV_VAR: &str = "KVLOG_MAX_AGE_DAYS";
pub const ROTATION_ENV_VAR: &str = "KVLOG_ROTATION";

pub const DEFAULT_LOG_PATH: &str = "./logs/log_out.log";
pub const DEFAULT_MAX_AGE_DAYS: u64 = 7;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// How often the log file is switched to a new, date-suffixed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Minutely,
    Hourly,
    Daily,
    Never,
}

impl LogRotation {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minutely" => Some(Self::Minutely),
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    /// Interval between two retention passes.
    pub fn period(self) -> Duration {
        match self {
            Self::Minutely => Duration::from_secs(60),
            Self::Hourly => Duration::from_secs(60 * 60),
            Self::Daily | Self::Never => Duration::from_secs(SECONDS_PER_DAY),
        }
    }
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Minutely => Rotation::MINUTELY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Records more verbose than this are dropped.
    pub level: LevelFilter,
    /// Append JSON records to this file, in addition to the console.
    pub path: Option<PathBuf>,
    /// Rotated files older than this are deleted. Zero keeps everything.
    pub max_age: Duration,
    pub rotation: LogRotation,
    /// Console output is JSON in production, colored text otherwise.
    pub prod: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            path: Some(PathBuf::from(DEFAULT_LOG_PATH)),
            max_age: Duration::from_secs(DEFAULT_MAX_AGE_DAYS * SECONDS_PER_DAY),
            rotation: LogRotation::Daily,
            prod: false,
        }
    }
}

impl LogConfig {
    /// Defaults overridden by `KVLOG_LEVEL`, `KVLOG_PATH`, `KVLOG_MAX_AGE_DAYS`,
    /// `KVLOG_ROTATION` and `KVLOG_PROD`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(level) = lookup(LEVEL_ENV_VAR) {
            config.level = parse_level(&level);
        }
        if let Some(path) = lookup(PATH_ENV_VAR) {
            // an empty path logs to the console only
            config.path = Some(path.trim())
                .filter(|p| !p.is_empty())
                .map(PathBuf::from);
        }
        if let Some(days) = lookup(MAX_AGE_ENV_VAR).and_then(|d| d.trim().parse::<u64>().ok()) {
            config.max_age = Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY));
        }
        if let Some(rotation) = lookup(ROTATION_ENV_VAR).as_deref().and_then(LogRotation::parse) {
            config.rotation = rotation;
        }
        if let Some(prod) = lookup(PROD_ENV_VAR) {
            config.prod = matches!(prod.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        config
    }
}

/// Unknown level names fall back to `warn`.
pub fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Warn)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LogConfig::from_lookup(lookup(&[]));
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.path, Some(PathBuf::from("./logs/log_out.log")));
        assert_eq!(config.max_age, Duration::from_secs(7 * 24 * 60 * 60));
        assert_eq!(config.rotation, LogRotation::Daily);
    }

    #[test]
    fn test_overrides() {
        let config = LogConfig::from_lookup(lookup(&[
            ("KVLOG_LEVEL", "debug"),
            ("KVLOG_PATH", "/var/log/svc/out.log"),
            ("KVLOG_MAX_AGE_DAYS", "30"),
            ("KVLOG_ROTATION", "Hourly"),
            ("KVLOG_PROD", "TRUE"),
        ]));
        assert_eq!(config.level, LevelFilter::Debug);
        assert_eq!(config.path, Some(PathBuf::from("/var/log/svc/out.log")));
        assert_eq!(config.max_age, Duration::from_secs(30 * 24 * 60 * 60));
        assert_eq!(config.rotation, LogRotation::Hourly);
        assert!(config.prod);
    }

    #[test]
    fn test_empty_path_disables_file() {
        let config = LogConfig::from_lookup(lookup(&[("KVLOG_PATH", " ")]));
        assert_eq!(config.path, None);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = LogConfig::from_lookup(lookup(&[
            ("KVLOG_MAX_AGE_DAYS", "a week"),
            ("KVLOG_ROTATION", "weekly"),
        ]));
        assert_eq!(config.max_age, LogConfig::default().max_age);
        assert_eq!(config.rotation, LogRotation::Daily);
    }

    #[test]
    fn test_unknown_level_falls_back_to_warn() {
        assert_eq!(parse_level("error"), LevelFilter::Error);
        assert_eq!(parse_level("loud"), LevelFilter::Warn);
        assert_eq!(parse_level(""), LevelFilter::Warn);
    }
}
