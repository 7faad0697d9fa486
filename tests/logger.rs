mod common;

use common::{Recorder, as_transport};
use rotalog::{
    Config, Level, Logger, ManualClock, Period, Stream, register_exit_handler,
};
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::thread;
use tempfile::tempdir;

fn recording_logger(level: Level) -> (Logger, Arc<Recorder>) {
    let recorder = Recorder::new(level);
    let logger = Logger::builder()
        .transport(as_transport(&recorder))
        .build()
        .unwrap();
    (logger, recorder)
}

#[test]
fn level_methods_respect_threshold() {
    let (logger, recorder) = recording_logger(Level::Info);
    assert_eq!(logger.level(), Level::Info);

    logger.trace("t");
    logger.debug("d");
    logger.info("i");
    logger.warn("w");
    logger.error("e");
    logger.panic("p");

    assert_eq!(recorder.messages(), vec!["i", "w", "e", "p"]);
}

#[test]
fn child_logger_carries_fields() {
    let (logger, recorder) = recording_logger(Level::Debug);
    let child = logger.with_field("request", 42).with_field("user", "alice");

    child.info("handled");
    logger.info("plain");

    let entries = recorder.entries();
    assert_eq!(entries[0].data.get("request"), Some(&Value::from(42)));
    assert_eq!(entries[0].data.get("user"), Some(&Value::from("alice")));
    assert!(entries[1].data.is_empty());
    assert!(logger.fields().is_empty());
}

#[test]
fn caller_is_attached_when_enabled() {
    let (logger, recorder) = recording_logger(Level::Info);
    logger.info("no caller");
    logger.set_report_caller(true);
    logger.info("with caller");

    let entries = recorder.entries();
    assert!(!entries[0].has_caller());
    assert!(entries[1].has_caller());
    let caller = entries[1].caller.as_ref().unwrap();
    assert!(caller.file.ends_with("logger.rs"));
    assert!(caller.line > 0);
}

#[test]
fn fatal_runs_exit_handlers_then_exit_fn() {
    let code = Arc::new(AtomicI32::new(-1));
    let handled = Arc::new(AtomicBool::new(false));
    let recorder = Recorder::new(Level::Info);

    let seen_code = Arc::clone(&code);
    let logger = Logger::builder()
        .transport(as_transport(&recorder))
        .exit_fn(move |c| seen_code.store(c, Ordering::SeqCst))
        .build()
        .unwrap();

    let flag = Arc::clone(&handled);
    register_exit_handler(move || flag.store(true, Ordering::SeqCst));

    logger.fatal("giving up");

    assert_eq!(recorder.levels(), vec![Level::Fatal]);
    assert!(handled.load(Ordering::SeqCst));
    assert_eq!(code.load(Ordering::SeqCst), 1);
}

#[test]
fn reset_and_close_through_logger() {
    let (logger, first) = recording_logger(Level::Info);
    let second = Recorder::new(Level::Trace);

    logger.reset(vec![as_transport(&second)]);
    assert_eq!(logger.level(), Level::Trace);
    logger.trace("to second");

    logger.close().unwrap();
    logger.error("dropped");

    assert!(first.entries().is_empty());
    assert_eq!(second.messages(), vec!["to second"]);
    assert_eq!(second.closes(), 1);
    assert_eq!(logger.transport_count(), 0);
    assert!(logger.multiplexer().is_empty());
    assert_eq!(logger.multiplexer().level(), Level::Panic);
}

#[test]
fn file_transport_writes_formatted_lines() {
    let dir = tempdir().unwrap();
    let clock = Arc::new(ManualClock::new(chrono::Local::now()));

    let logger = Logger::builder()
        .level(Level::Debug)
        .file(dir.path(), "app")
        .period(Period::None)
        .clock(clock)
        .done()
        .build()
        .unwrap();

    logger.with_field("port", 8080).debug("listening");
    logger.with_field("user", "alice smith").warn("login failed\n");
    logger.trace("hidden");
    logger.close().unwrap();

    let content = fs::read_to_string(dir.path().join("app.log")).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("] [DEBU] listening port=8080"), "{}", lines[0]);
    assert!(
        lines[1].ends_with(r#"] [WARN] login failed user="alice smith""#),
        "{}",
        lines[1]
    );
}

#[test]
fn file_transport_levels_are_independent() {
    let dir = tempdir().unwrap();
    let logger = Logger::builder()
        .file(dir.path(), "errors")
        .period(Period::None)
        .level(Level::Error)
        .done()
        .file(dir.path(), "all")
        .period(Period::None)
        .level(Level::Trace)
        .done()
        .build()
        .unwrap();

    assert_eq!(logger.transport_count(), 2);
    logger.info("routine");
    logger.error("broken");
    logger.close().unwrap();

    let errors = fs::read_to_string(dir.path().join("errors.log")).unwrap();
    let all = fs::read_to_string(dir.path().join("all.log")).unwrap();
    assert_eq!(errors.lines().count(), 1);
    assert!(errors.contains("broken"));
    assert_eq!(all.lines().count(), 2);
}

#[test]
fn builder_fails_on_bad_file_name() {
    let dir = tempdir().unwrap();
    let result = Logger::builder()
        .file(dir.path(), "")
        .done()
        .stream(Stream::Stderr)
        .done()
        .build();
    assert!(result.is_err());
}

#[test]
fn logger_from_config() {
    let dir = tempdir().unwrap();
    let toml = format!(
        r#"
[general]
level = "debug"

[file]
dir = '{}'
name = "svc"
period = "none"
mirror = "none"
level = "warn"
"#,
        dir.path().display()
    );
    let config: Config = toml.parse().unwrap();
    let logger = Logger::from_config_with(&config).unwrap();

    assert_eq!(logger.transport_count(), 1);
    assert_eq!(logger.level(), Level::Warn);

    logger.info("skipped");
    logger.error("kept");
    logger.close().unwrap();

    let content = fs::read_to_string(dir.path().join("svc.log")).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("[ERRO] kept"));
}

#[test]
fn concurrent_logging_to_file_keeps_lines_whole() {
    const THREADS: usize = 8;
    const LINES: usize = 300;

    let dir = tempdir().unwrap();
    let logger = Logger::builder()
        .file(dir.path(), "app")
        .period(Period::None)
        .done()
        .build()
        .unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.with_field("thread", t);
            thread::spawn(move || {
                for i in 0..LINES {
                    logger.with_field("line", i).info("tick");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    logger.close().unwrap();

    let content = fs::read_to_string(dir.path().join("app.log")).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * LINES);
    assert!(lines
        .iter()
        .all(|l| l.contains("] [INFO] tick line=") && l.contains(" thread=")));
}
