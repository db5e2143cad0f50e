use kvlog::fields::field_get;
use kvlog::levels::Level;
use kvlog::panic_hook::init_panic_hook;
use kvlog::test_utils::InMemoryLoggingGuard;
use kvlog::value::Value;
use serial_test::serial;

#[test]
#[serial]
fn test_panic_is_logged_at_panic_site() {
    let guard = InMemoryLoggingGuard::new();
    init_panic_hook();
    init_panic_hook();

    let panic_line = line!() + 2;
    let result = std::panic::catch_unwind(|| {
        panic!("out of widgets");
    });
    assert!(result.is_err());

    let records = guard.sink.take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::Fatal);
    assert_eq!(records[0].msg, "panic");
    assert_eq!(
        field_get(&records[0].fields, "caller"),
        Some(&Value::from(format!("tests/panic_hook_tests.rs:{panic_line}")))
    );
    assert_eq!(
        field_get(&records[0].fields, "panic"),
        Some(&Value::from("out of widgets"))
    );
    let names: Vec<&str> = records[0].fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["caller", "trace_id", "span_id", "panic"]);
}
