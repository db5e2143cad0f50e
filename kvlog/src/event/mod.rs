//! Sinks receiving composed log records
mod sink;
pub use sink::*;

pub mod in_memory_sink;
