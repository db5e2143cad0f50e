/// Builds a `Vec<Value>` of alternating keys and values.
///
/// ```
/// let kvs = kvlog::kvs!["op", "charge", "amount", 12];
/// assert_eq!(kvs.len(), 4);
/// ```
#[macro_export]
macro_rules! kvs {
    ($($kv:expr),* $(,)?) => {
        vec![$($crate::value::Value::from($kv)),*]
    };
}

/// Logs alternating keys and values at the given level.
///
/// ```
/// use kvlog::{context::LogContext, levels::Level};
/// let ctx = LogContext::background();
/// kvlog::log!(Level::Info, &ctx, "op", "charge");
/// ```
#[macro_export]
macro_rules! log {
    ($lvl:expr, $ctx:expr $(, $kv:expr)* $(,)?) => {
        $crate::dispatch::log($lvl, $ctx, &[$($crate::value::Value::from($kv)),*])
    };
}

#[macro_export]
macro_rules! fatal {
    ($ctx:expr $(, $kv:expr)* $(,)?) => {
        $crate::log!($crate::levels::Level::Fatal, $ctx $(, $kv)*)
    };
}

#[macro_export]
macro_rules! error {
    ($ctx:expr $(, $kv:expr)* $(,)?) => {
        $crate::log!($crate::levels::Level::Error, $ctx $(, $kv)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($ctx:expr $(, $kv:expr)* $(,)?) => {
        $crate::log!($crate::levels::Level::Warn, $ctx $(, $kv)*)
    };
}

#[macro_export]
macro_rules! info {
    ($ctx:expr $(, $kv:expr)* $(,)?) => {
        $crate::log!($crate::levels::Level::Info, $ctx $(, $kv)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($ctx:expr $(, $kv:expr)* $(,)?) => {
        $crate::log!($crate::levels::Level::Debug, $ctx $(, $kv)*)
    };
}

#[macro_export]
macro_rules! trace {
    ($ctx:expr $(, $kv:expr)* $(,)?) => {
        $crate::log!($crate::levels::Level::Trace, $ctx $(, $kv)*)
    };
}
