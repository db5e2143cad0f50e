use kvlog::caller::CallSite;
use kvlog::context::LogContext;
use kvlog::dispatch::{self, get_sink, init_event_dispatch, log_enabled};
use kvlog::errors::Error;
use kvlog::event::NullEventSink;
use kvlog::event::in_memory_sink::InMemorySink;
use kvlog::fields::field_get;
use kvlog::kvs;
use kvlog::levels::{Level, LevelFilter, set_max_level};
use kvlog::test_utils::InMemoryLoggingGuard;
use kvlog::value::Value;
use serial_test::serial;
use std::sync::Arc;
use std::thread;

#[test]
#[serial]
fn test_no_dispatch_is_a_no_op() {
    assert!(get_sink().is_none());
    assert!(!log_enabled(Level::Fatal));
    kvlog::info!(&LogContext::background(), "k", "v");
    kvlog::warn!(&LogContext::background(), "odd");
}

#[test]
#[serial]
fn test_double_init() {
    let _guard = InMemoryLoggingGuard::new();
    assert_eq!(
        init_event_dispatch(Arc::new(NullEventSink {})),
        Err(Error::AlreadyInitialized())
    );
}

#[test]
#[serial]
fn test_sink_lifecycle() {
    let sink = {
        let guard = InMemoryLoggingGuard::new();
        assert!(guard.sink.state.lock().unwrap().started);
        guard.sink.clone()
    };
    assert!(sink.state.lock().unwrap().shut_down);
    assert!(get_sink().is_none());
}

#[test]
#[serial]
fn test_caller_is_the_application_call_site() {
    let guard = InMemoryLoggingGuard::new();
    let ctx = LogContext::background();

    let macro_line = line!() + 1;
    kvlog::info!(&ctx, "via", "macro");
    let fn_line = line!() + 1;
    dispatch::info(&ctx, &kvs!["via", "function"]);
    let level_line = line!() + 1;
    dispatch::log(Level::Debug, &ctx, &kvs!["via", "log"]);
    let msg_line = line!() + 1;
    dispatch::log_with_message(Level::Error, &ctx, "boom", &kvs!["via", "message"]);

    let records = guard.sink.take_records();
    let callers: Vec<Value> = records
        .iter()
        .map(|r| field_get(&r.fields, "caller").cloned().unwrap())
        .collect();
    assert_eq!(
        callers,
        vec![
            Value::from(format!("tests/dispatch_tests.rs:{macro_line}")),
            Value::from(format!("tests/dispatch_tests.rs:{fn_line}")),
            Value::from(format!("tests/dispatch_tests.rs:{level_line}")),
            Value::from(format!("tests/dispatch_tests.rs:{msg_line}")),
        ]
    );
    assert_eq!(records[3].msg, "boom");
}

#[test]
#[serial]
fn test_explicit_call_site() {
    let guard = InMemoryLoggingGuard::new();
    let file = String::from("/srv/bridge/src/adapter.rs");
    dispatch::log_at(
        Level::Warn,
        &LogContext::background(),
        "",
        &kvs!["from", "bridge"],
        CallSite::new(&file, 9),
    );
    let records = guard.sink.take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(
        field_get(&records[0].fields, "caller"),
        Some(&Value::from("src/adapter.rs:9"))
    );
}

#[test]
#[serial]
fn test_level_filtering() {
    let guard = InMemoryLoggingGuard::with_sink(InMemorySink::with_max_level(LevelFilter::Info));
    let ctx = LogContext::background();
    kvlog::debug!(&ctx, "k", 1);
    kvlog::trace!(&ctx, "k", 2);
    kvlog::info!(&ctx, "k", 3);
    kvlog::fatal!(&ctx, "k", 4);
    let levels: Vec<Level> = guard.sink.take_records().iter().map(|r| r.level).collect();
    assert_eq!(levels, vec![Level::Info, Level::Fatal]);

    set_max_level(LevelFilter::Error);
    assert!(!log_enabled(Level::Warn));
    kvlog::warn!(&ctx, "k", 5);
    kvlog::error!(&ctx, "k", 6);
    set_max_level(LevelFilter::Trace);
    let records = guard.sink.take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(field_get(&records[0].fields, "k"), Some(&Value::from(6)));
}

#[test]
#[serial]
fn test_disabled_level_skips_diagnostic() {
    let guard = InMemoryLoggingGuard::with_sink(InMemorySink::with_max_level(LevelFilter::Warn));
    kvlog::debug!(&LogContext::background(), "odd");
    assert!(guard.sink.take_records().is_empty());
}

#[test]
#[serial]
fn test_concurrent_logging() {
    let guard = InMemoryLoggingGuard::new();
    let mut threads = Vec::new();
    for t in 0..4 {
        threads.push(thread::spawn(move || {
            let ctx = LogContext::background().with_value("worker", t);
            for i in 0..100 {
                kvlog::info!(&ctx, "thread", t, "i", i);
            }
        }));
    }
    for t in threads {
        t.join().unwrap();
    }
    let records = guard.sink.take_records();
    assert_eq!(records.len(), 400);
    assert!(records.iter().all(|r| r.fields.len() == 5));
    assert!(
        records
            .iter()
            .all(|r| r.fields[3].name == "thread" && r.fields[4].name == "i")
    );
}
