//! Error types and handling for logging operations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Event dispatch already initialized")]
    AlreadyInitialized(),

    #[error("prefix key/values must appear in pairs, got {0} values")]
    OddPrefixPairs(usize),

    #[error("key/values must appear in pairs: {0}")]
    MalformedKeyValues(String),

    #[error("invalid level filter: {0}")]
    InvalidLevel(String),

    #[error("invalid traceparent header: {0}")]
    InvalidTraceParent(String),
}

pub type Result<T> = std::result::Result<T, Error>;
