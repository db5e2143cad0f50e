//! Severity levels and the process-wide maximum level
use crate::errors::Error;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

/// Severity of a log record. Lower is more severe.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Fatal = 1,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Threshold compared against [`Level`]: a record passes when `level <= filter`.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LevelFilter {
    Off = 0,
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

static LEVEL_NAMES: [&str; 7] = ["OFF", "FATAL", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"];

impl Level {
    pub fn as_str(self) -> &'static str {
        LEVEL_NAMES[self as usize]
    }

    pub fn to_level_filter(self) -> LevelFilter {
        LevelFilter::from_u32(self as u32).unwrap_or(LevelFilter::Trace)
    }

    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::Fatal),
            2 => Some(Self::Error),
            3 => Some(Self::Warn),
            4 => Some(Self::Info),
            5 => Some(Self::Debug),
            6 => Some(Self::Trace),
            _ => None,
        }
    }
}

impl LevelFilter {
    pub fn as_str(self) -> &'static str {
        LEVEL_NAMES[self as usize]
    }

    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::Fatal),
            2 => Some(Self::Error),
            3 => Some(Self::Warn),
            4 => Some(Self::Info),
            5 => Some(Self::Debug),
            6 => Some(Self::Trace),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match LevelFilter::from_str(s)? {
            LevelFilter::Off => Err(Error::InvalidLevel(s.to_owned())),
            filter => Level::from_u32(filter as u32).ok_or_else(|| Error::InvalidLevel(s.to_owned())),
        }
    }
}

impl FromStr for LevelFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LEVEL_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(s.trim()))
            .and_then(|idx| LevelFilter::from_u32(idx as u32))
            .ok_or_else(|| Error::InvalidLevel(s.to_owned()))
    }
}

impl PartialEq<LevelFilter> for Level {
    fn eq(&self, other: &LevelFilter) -> bool {
        *self as u32 == *other as u32
    }
}

impl PartialOrd<LevelFilter> for Level {
    fn partial_cmp(&self, other: &LevelFilter) -> Option<Ordering> {
        Some((*self as u32).cmp(&(*other as u32)))
    }
}

impl PartialEq<Level> for LevelFilter {
    fn eq(&self, other: &Level) -> bool {
        *self as u32 == *other as u32
    }
}

impl PartialOrd<Level> for LevelFilter {
    fn partial_cmp(&self, other: &Level) -> Option<Ordering> {
        Some((*self as u32).cmp(&(*other as u32)))
    }
}

static MAX_LEVEL: AtomicU32 = AtomicU32::new(LevelFilter::Trace as u32);

/// Sets the global maximum level. Records above it are dropped before any field is composed.
pub fn set_max_level(level: LevelFilter) {
    MAX_LEVEL.store(level as u32, AtomicOrdering::Relaxed);
}

#[inline(always)]
pub fn max_level() -> LevelFilter {
    LevelFilter::from_u32(MAX_LEVEL.load(AtomicOrdering::Relaxed)).unwrap_or(LevelFilter::Off)
}
