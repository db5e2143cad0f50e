//! Structured logging field composer
//!
//! Every log call carries a flat list of alternating keys and values. The
//! composer turns it into an ordered, deduplicated field list: the call site,
//! the trace and span identifiers of the request context, the explicit
//! key/values, then the process-wide prefixes registered with
//! [`dispatch::set_context`]. The record is then handed to the installed
//! [`event::EventSink`]; encoding and writing are the sink's business, see the
//! `kvlog-sink` crate.
//!
//! # Examples
//! ```
//! use kvlog::{context::LogContext, dispatch, event, guards, kvs};
//!
//! // Applications install a sink once, here a null sink.
//! // Libraries don't need (and should not) setup any LoggingSystemGuard
//! let _guard = guards::LoggingSystemGuard::new(std::sync::Arc::new(event::NullEventSink {}));
//!
//! // Defaults applied to every later call, unless the call's context binds the same key
//! dispatch::set_context(&LogContext::background(), &kvs!["service", "checkout"]).unwrap();
//!
//! let ctx = LogContext::background().with_value("service", "checkout-eu");
//! kvlog::info!(&ctx, "op", "charge", "amount", 12);
//! kvlog::warn!(&ctx, "op", "refund");
//! ```
//!

// crate-specific lint exceptions:
#![allow(clippy::missing_errors_doc)]

pub mod caller;
pub mod composer;
pub mod context;
pub mod dispatch;
pub mod errors;
pub mod event;
pub mod fields;
pub mod guards;
pub mod levels;
pub mod logs;
pub mod panic_hook;
pub mod prefix;
pub mod test_utils;
pub mod trace;
pub mod value;

#[macro_use]
extern crate lazy_static;

#[macro_use]
mod macros;

pub mod prelude {
    pub use crate::context::LogContext;
    pub use crate::levels::*;
    pub use crate::trace::SpanContext;
    pub use crate::value::Value;
    pub use crate::{debug, error, fatal, info, kvs, log, trace, warn};
}
