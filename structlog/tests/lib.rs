#![expect(missing_docs, reason = "tests")]

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::sync::{Arc, Mutex};

use indoc::indoc;
use pretty_assertions::assert_eq;
use serial_test::serial;
use structlog::render::{JsonRenderer, YamlRenderer};
use structlog::{
    GenericLoggable, Level, Loggable, Logger, Param, TestBackend, TestEntry, Value, config, params,
};
use test_case::test_case;

fn test_logger() -> (Logger<TestBackend>, Arc<Mutex<Vec<TestEntry>>>) {
    config::reset();
    let (backend, entries) = TestBackend::new();
    (Logger::with_backend(backend), entries)
}

fn messages(entries: &Arc<Mutex<Vec<TestEntry>>>) -> Vec<String> {
    entries
        .lock()
        .unwrap()
        .iter()
        .map(|entry| entry.message.clone())
        .collect()
}

#[derive(Debug)]
struct ChainError {
    message: String,
    source: Option<Box<ChainError>>,
}

impl ChainError {
    fn new(message: &str, source: Option<ChainError>) -> Self {
        Self {
            message: message.to_owned(),
            source: source.map(Box::new),
        }
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ChainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn Error + 'static))
    }
}

#[derive(Debug)]
struct RequestContext {
    id: String,
    attempts: i64,
}

impl Loggable for RequestContext {
    fn fields(&self) -> Option<Vec<Param>> {
        Some(params![
            "requestId",
            self.id.clone(),
            "attempts",
            self.attempts
        ])
    }

    fn name(&self) -> &str {
        "RequestContext"
    }
}

#[derive(Debug)]
struct OddLoggable;

impl Loggable for OddLoggable {
    fn fields(&self) -> Option<Vec<Param>> {
        Some(params!["a", 1, "orphan"])
    }

    fn name(&self) -> &str {
        "OddLoggable"
    }
}

#[derive(Debug)]
struct NullLoggable;

impl Loggable for NullLoggable {
    fn fields(&self) -> Option<Vec<Param>> {
        None
    }

    fn name(&self) -> &str {
        "NullLoggable"
    }
}

#[derive(Debug)]
struct PanickyLoggable;

impl Loggable for PanickyLoggable {
    fn fields(&self) -> Option<Vec<Param>> {
        panic!("loggable blew up")
    }
}

#[test]
#[serial]
fn renders_flat_pairs_in_call_order() {
    let (log, entries) = test_logger();

    log.info("Hello", params!["a", "b"]);

    assert_eq!(messages(&entries), vec!["Hello, a=b"]);
}

#[test]
#[serial]
fn no_params_renders_message_alone() {
    let (log, entries) = test_logger();

    log.info("Hello", params![]);

    assert_eq!(messages(&entries), vec!["Hello"]);
}

#[test]
#[serial]
fn empty_message_is_tolerated() {
    let (log, entries) = test_logger();

    log.info("", params!["a", "b"]);

    assert_eq!(messages(&entries), vec![", a=b"]);
}

#[test]
#[serial]
fn odd_params_drop_trailing_element_with_one_diagnostic() {
    let (log, entries) = test_logger();

    log.info("Hello", params!["a", "b", "c"]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].level, Level::Warn);
    assert!(captured[0].message.starts_with("[structlog] :"));
    assert!(
        captured[0]
            .message
            .contains("odd number of parameters (3)")
    );
    assert!(captured[0].message.contains("`c`"));
    assert_eq!(captured[1].message, "Hello, a=b");
}

#[test]
#[serial]
fn key_with_spaces_stops_positional_pairing() {
    let (log, entries) = test_logger();

    log.info("Hi", params!["bad key", "v", "x", "y"]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].level, Level::Warn);
    assert!(captured[0].message.contains("`bad key` with spaces"));
    // Pairing is untrusted after the invalid key, so `x`/`y` are skipped.
    assert_eq!(captured[1].message, "Hi");
}

#[test]
#[serial]
fn non_string_key_is_dropped_with_diagnostic() {
    let (log, entries) = test_logger();

    log.info("Hi", params![42, "v"]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 2);
    assert!(
        captured[0]
            .message
            .contains("expected to be of type string")
    );
    assert_eq!(captured[1].message, "Hi");
}

#[test]
#[serial]
fn map_param_expands_into_fields() {
    let (log, entries) = test_logger();
    let mut map = BTreeMap::new();
    map.insert("a", 1);
    map.insert("b", 2);

    log.info("Hi", params![map]);

    assert_eq!(messages(&entries), vec!["Hi, a=1, b=2"]);
}

#[test]
#[serial]
fn map_after_invalid_key_is_still_recognized() {
    let (log, entries) = test_logger();
    let mut map = BTreeMap::new();
    map.insert("a", 1);
    map.insert("b", 2);

    log.info("Hi", params!["bad key", "x", 7, map]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 2);
    assert!(captured[0].message.contains("with spaces"));
    assert_eq!(captured[1].message, "Hi, a=1, b=2");
}

#[test]
#[serial]
fn map_following_valid_key_is_its_value() {
    let (log, entries) = test_logger();
    let mut map = BTreeMap::new();
    map.insert("a", 1);
    map.insert("b", 2);

    log.info("Hi", params!["m", map]);

    assert_eq!(messages(&entries), vec!["Hi, m=\"{a=1, b=2}\""]);
}

#[test]
#[serial]
fn loggable_expands_its_own_fields() {
    let (log, entries) = test_logger();
    let context = RequestContext {
        id: "r1".to_owned(),
        attempts: 2,
    };

    log.info("Hi", params![Param::loggable(context)]);

    assert_eq!(messages(&entries), vec!["Hi, requestId=r1, attempts=2"]);
}

#[test]
#[serial]
fn loggable_odd_fields_dropped_independently_of_outer_parity() {
    let (log, entries) = test_logger();

    log.info("Hi", params![Param::loggable(OddLoggable), "k", "v"]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 2);
    assert!(captured[0].message.contains("`OddLoggable`"));
    assert_eq!(captured[1].message, "Hi, a=1, k=v");
}

#[test]
#[serial]
fn loggable_returning_no_fields_is_skipped_with_diagnostic() {
    let (log, entries) = test_logger();

    log.info("Hi", params![Param::loggable(NullLoggable)]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 2);
    assert!(
        captured[0]
            .message
            .contains("`NullLoggable` returned no fields")
    );
    assert_eq!(captured[1].message, "Hi");
}

#[test]
#[serial]
fn error_is_extracted_and_forwarded() {
    let (log, entries) = test_logger();
    let error = ChainError::new("boom", None);

    log.error("boom", params![Param::error(error)]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].level, Level::Error);
    assert_eq!(captured[0].message, "boom, errorMessage=boom");
    assert_eq!(captured[0].error, Some("boom".to_owned()));
}

#[test]
#[serial]
fn error_message_is_the_root_cause() {
    let (log, entries) = test_logger();
    let error = ChainError::new("wrapper", Some(ChainError::new("disk full", None)));

    log.error("failed", params![Param::error(error)]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured[0].message, "failed, errorMessage=\"disk full\"");
    // The outer error object is the one forwarded.
    assert_eq!(captured[0].error, Some("wrapper".to_owned()));
}

#[test]
#[serial]
fn first_error_forwarded_each_error_fielded() {
    let (log, entries) = test_logger();
    let first = ChainError::new("first", None);
    let second = ChainError::new("second", None);

    log.error("failed", params![Param::error(first), Param::error(second)]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(
        captured[0].message,
        "failed, errorMessage=first, errorMessage=second"
    );
    assert_eq!(captured[0].error, Some("first".to_owned()));
}

#[test]
#[serial]
fn error_in_a_value_slot_is_stringified_not_forwarded() {
    let (log, entries) = test_logger();
    let error = ChainError::new("boom", None);

    log.error("failed", params!["cause", Param::error(error)]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured[0].message, "failed, cause=boom");
    assert_eq!(captured[0].error, None);
}

#[test]
#[serial]
fn bound_context_follows_call_site_fields() {
    let (mut log, entries) = test_logger();

    log.bind(params!["user", "u1"]);
    log.info("Hi", params!["a", "b"]);

    assert_eq!(messages(&entries), vec!["Hi, a=b, user=u1"]);
}

#[test]
#[serial]
fn bind_deduplicates_last_write_wins() {
    let (mut log, entries) = test_logger();

    log.bind(params!["k", "v1", "k", "v2"]);
    log.info("Hi", params![]);

    assert_eq!(messages(&entries), vec!["Hi, k=v2"]);
}

#[test]
#[serial]
fn new_bind_replaces_and_is_idempotent() {
    let (mut log, entries) = test_logger();

    log.bind(params!["old", "x"]);
    log.new_bind(params!["user", "u1"]);
    log.new_bind(params!["user", "u1"]);
    log.info("Hi", params![]);

    assert_eq!(messages(&entries), vec!["Hi, user=u1"]);
}

#[test]
#[serial]
fn unbind_requires_key_and_value_match() {
    let (mut log, entries) = test_logger();

    log.bind(params!["user", "u1", "region", "eu"]);
    log.unbind(params!["user", "other"]);
    log.info("Hi", params![]);
    log.unbind(params!["user", "u1"]);
    log.info("Hi", params![]);

    assert_eq!(
        messages(&entries),
        vec!["Hi, user=u1, region=eu", "Hi, region=eu"]
    );
}

#[test]
#[serial]
fn global_context_wins_over_call_site_fields() {
    let (log, entries) = test_logger();
    config::set_global_context(GenericLoggable::new(params!["env", "prod"]));

    log.info("Hi", params!["env", "dev"]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].level, Level::Warn);
    assert!(captured[0].message.contains("`env` ignored"));
    assert!(captured[0].message.contains("takes precedence"));
    assert_eq!(captured[1].message, "Hi, env=prod");
    assert!(!captured[1].message.contains("dev"));
}

#[test]
#[serial]
fn global_context_wins_over_bound_context() {
    let (mut log, entries) = test_logger();
    config::set_global_context(GenericLoggable::new(params!["env", "prod"]));

    log.bind(params!["env", "dev"]);
    log.info("Hi", params![]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 2);
    assert!(captured[0].message.contains("`env` ignored"));
    assert_eq!(captured[1].message, "Hi, env=prod");
}

#[test]
#[serial]
fn global_context_accepts_maps() {
    let (log, entries) = test_logger();
    let mut map = BTreeMap::new();
    map.insert("env", "prod");
    config::set_global_context(GenericLoggable::from(map));

    log.info("Hi", params![]);

    assert_eq!(messages(&entries), vec!["Hi, env=prod"]);
}

#[test]
#[serial]
fn cleared_global_context_leaves_no_trace() {
    let (log, entries) = test_logger();
    config::set_global_context(GenericLoggable::new(params!["env", "prod"]));
    config::clear_global_context();

    log.info("Hi", params!["env", "dev"]);

    assert_eq!(messages(&entries), vec!["Hi, env=dev"]);
}

#[test]
#[serial]
fn configured_global_context_is_readable() {
    config::reset();
    assert!(config::global_context().is_none());

    config::set_global_context(GenericLoggable::new(params!["env", "prod"]));

    let supplier = config::global_context().expect("supplier was just set");
    assert_eq!(supplier.name(), "GenericLoggable");
    assert_eq!(supplier.fields().map(|fields| fields.len()), Some(2));
}

#[test]
#[serial]
fn configured_value_renderer_is_readable() {
    config::reset();
    config::set_value_renderer(|value| format!("<{value}>"));

    let render = config::value_renderer();
    assert_eq!((*render)(&Value::from("b")), "<b>");
}

#[test]
#[serial]
fn separator_is_configurable() {
    let (log, entries) = test_logger();
    config::set_separator(";");

    log.info("Hello", params!["a", "b"]);

    assert_eq!(messages(&entries), vec!["Hello; a=b"]);
}

#[test]
#[serial]
fn value_renderer_is_configurable() {
    let (log, entries) = test_logger();
    config::set_value_renderer(|value| format!("<{value}>"));

    log.info("Hello", params!["a", "b"]);

    assert_eq!(messages(&entries), vec!["Hello, a=<b>"]);
}

#[test]
#[serial]
fn json_renderer_output_round_trips() {
    let (log, entries) = test_logger();
    config::set_renderer(&JsonRenderer::DEFAULT);

    log.info(
        "Hello world",
        params!["a", "b", "n", 5, "f", 2.5, "t", true, "z", Value::Null],
    );

    let line = messages(&entries).remove(0);
    assert!(line.starts_with("{\"message\""));
    let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(parsed["message"], "Hello world");
    assert_eq!(parsed["a"], "b");
    assert_eq!(parsed["n"], 5);
    assert_eq!(parsed["f"], 2.5);
    assert_eq!(parsed["t"], true);
    assert_eq!(parsed["z"], serde_json::Value::Null);
}

#[test]
#[serial]
fn json_renderer_renames_reserved_message_key() {
    let (log, entries) = test_logger();
    config::set_renderer(&JsonRenderer::DEFAULT);

    log.info("Hi", params!["message", "shadow"]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 2);
    assert!(captured[0].message.contains("renamed to `custom_message`"));
    let parsed: serde_json::Value = serde_json::from_str(&captured[1].message).unwrap();
    assert_eq!(parsed["message"], "Hi");
    assert_eq!(parsed["custom_message"], "shadow");
}

#[test]
#[serial]
fn yaml_renderer_emits_block_mapping() {
    let (log, entries) = test_logger();
    config::set_renderer(&YamlRenderer::DEFAULT);

    log.info("Hi", params!["a", "b"]);

    assert_eq!(
        messages(&entries),
        vec![
            indoc! {"
                message: Hi
                a: b
            "}
            .trim()
            .to_owned()
        ]
    );
}

#[test]
#[serial]
fn yaml_renderer_renames_reserved_message_key() {
    let (log, entries) = test_logger();
    config::set_renderer(&YamlRenderer::DEFAULT);

    log.info("Hi", params!["message", "shadow"]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 2);
    assert!(captured[0].message.contains("renamed to `message1`"));
    assert!(captured[1].message.contains("message1: shadow"));
}

#[test]
#[serial]
fn disabled_backend_skips_the_whole_pipeline() {
    config::reset();
    let (backend, entries) = TestBackend::disabled();
    let log = Logger::with_backend(backend);

    // Malformed input would normally produce diagnostics; with the level
    // disabled nothing at all reaches the backend.
    log.info("Hi", params!["bad key", "v", "c"]);

    assert!(entries.lock().unwrap().is_empty());
    assert!(!log.is_info_enabled());
}

#[test]
#[serial]
fn enablement_queries_pass_through() {
    let (log, _entries) = test_logger();

    assert!(log.is_error_enabled());
    assert!(log.is_warn_enabled());
    assert!(log.is_info_enabled());
    assert!(log.is_debug_enabled());
    assert!(log.is_trace_enabled());
}

#[test]
#[serial]
fn panicking_loggable_becomes_one_error_diagnostic() {
    let (log, entries) = test_logger();

    log.info("Hi", params![Param::loggable(PanickyLoggable)]);

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].level, Level::Error);
    assert!(captured[0].message.contains("unexpected logger error"));
    assert!(captured[0].message.contains("loggable blew up"));
}

#[test]
#[serial]
fn log_backend_attaches_error_as_key_value() {
    config::reset();
    static RECORDS: Mutex<Vec<(String, Option<String>)>> = Mutex::new(Vec::new());

    struct CapturingLogger;

    impl log::Log for CapturingLogger {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            struct ErrorVisitor<'a>(&'a mut Option<String>);

            impl<'kvs> log::kv::VisitSource<'kvs> for ErrorVisitor<'_> {
                fn visit_pair(
                    &mut self,
                    key: log::kv::Key<'kvs>,
                    value: log::kv::Value<'kvs>,
                ) -> Result<(), log::kv::Error> {
                    if key.as_str() == "error" {
                        *self.0 = Some(value.to_string());
                    }
                    Ok(())
                }
            }

            let mut error = None;
            let _ = record.key_values().visit(&mut ErrorVisitor(&mut error));
            RECORDS
                .lock()
                .unwrap()
                .push((record.args().to_string(), error));
        }

        fn flush(&self) {}
    }

    static LOGGER: CapturingLogger = CapturingLogger;
    log::set_logger(&LOGGER).expect("no other test installs a logger");
    log::set_max_level(log::LevelFilter::Trace);

    let log = Logger::new("app::orders");
    log.error("boom", params![Param::error(ChainError::new("boom", None))]);
    log.info("Hello", params!["a", "b"]);

    let records = RECORDS.lock().unwrap();
    assert_eq!(
        *records,
        vec![
            (
                "boom, errorMessage=boom".to_owned(),
                Some("boom".to_owned())
            ),
            ("Hello, a=b".to_owned(), None),
        ]
    );
}

#[test_case(Level::Error)]
#[test_case(Level::Warn)]
#[test_case(Level::Info)]
#[test_case(Level::Debug)]
#[test_case(Level::Trace)]
#[serial]
fn each_level_routes_to_the_backend(level: Level) {
    let (log, entries) = test_logger();

    match level {
        Level::Error => log.error("m", params![]),
        Level::Warn => log.warn("m", params![]),
        Level::Info => log.info("m", params![]),
        Level::Debug => log.debug("m", params![]),
        Level::Trace => log.trace("m", params![]),
    }

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].level, level);
}
