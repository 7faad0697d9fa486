mod common;

use common::{Recorder, as_transport};
use rotalog::{Entry, Level, Multiplexer, internal};
use std::sync::Arc;
use std::thread;

#[test]
fn empty_multiplexer_is_at_panic() {
    let mux = Multiplexer::default();
    assert!(mux.is_empty());
    assert_eq!(mux.level(), Level::Panic);
    assert!(mux.is_enabled(Level::Panic));
    assert!(!mux.is_enabled(Level::Fatal));

    // Dispatching into nothing is fine.
    mux.dispatch(&Entry::new(Level::Error, "nobody listens"));
}

#[test]
fn level_is_most_verbose_threshold() {
    let errors = Recorder::new(Level::Error);
    let debug = Recorder::new(Level::Debug);
    let mux = Multiplexer::new(vec![as_transport(&errors), as_transport(&debug)]);

    assert_eq!(mux.len(), 2);
    assert_eq!(mux.level(), Level::Debug);
    assert!(mux.is_enabled(Level::Debug));
    assert!(!mux.is_enabled(Level::Trace));
}

#[test]
fn dispatch_honours_each_threshold() {
    let info = Recorder::new(Level::Info);
    let debug = Recorder::new(Level::Debug);
    let mux = Multiplexer::new(vec![as_transport(&info), as_transport(&debug)]);

    for level in Level::all() {
        mux.dispatch(&Entry::new(level, level.as_str()));
    }

    assert_eq!(
        info.levels(),
        vec![
            Level::Panic,
            Level::Fatal,
            Level::Error,
            Level::Warn,
            Level::Info
        ]
    );
    assert_eq!(debug.levels().len(), 6);
    assert!(!debug.levels().contains(&Level::Trace));
}

#[test]
fn failing_transport_does_not_block_others() {
    let broken = Recorder::failing(Level::Trace);
    let healthy = Recorder::new(Level::Trace);
    let mux = Multiplexer::new(vec![as_transport(&broken), as_transport(&healthy)]);

    let before = internal::failure_count();
    mux.dispatch(&Entry::new(Level::Warn, "still delivered"));

    assert_eq!(healthy.messages(), vec!["still delivered"]);
    assert!(broken.entries().is_empty());
    assert!(internal::failure_count() > before);
}

#[test]
fn reset_replaces_transports_without_closing() {
    let old = Recorder::new(Level::Trace);
    let new = Recorder::new(Level::Warn);
    let mux = Multiplexer::new(vec![as_transport(&old)]);
    assert_eq!(mux.level(), Level::Trace);

    mux.reset(vec![as_transport(&new)]);
    assert_eq!(mux.level(), Level::Warn);
    assert_eq!(mux.len(), 1);

    mux.dispatch(&Entry::new(Level::Error, "after reset"));
    assert!(old.entries().is_empty());
    assert_eq!(new.messages(), vec!["after reset"]);
    assert_eq!(old.closes(), 0);

    mux.reset(Vec::new());
    assert_eq!(mux.level(), Level::Panic);
    assert!(mux.is_empty());
}

#[test]
fn close_detaches_and_is_idempotent() {
    let a = Recorder::new(Level::Info);
    let b = Recorder::new(Level::Debug);
    let mux = Multiplexer::new(vec![as_transport(&a), as_transport(&b)]);

    mux.close().unwrap();
    assert_eq!(a.closes(), 1);
    assert_eq!(b.closes(), 1);
    assert!(mux.is_empty());
    assert_eq!(mux.level(), Level::Panic);

    mux.dispatch(&Entry::new(Level::Panic, "after close"));
    assert!(a.entries().is_empty());
    assert!(b.entries().is_empty());

    mux.close().unwrap();
    assert_eq!(a.closes(), 1);
    assert_eq!(b.closes(), 1);
}

#[test]
fn close_reports_first_error_and_closes_everything() {
    let broken = Recorder::failing(Level::Info);
    let healthy = Recorder::new(Level::Info);
    let mux = Multiplexer::new(vec![as_transport(&broken), as_transport(&healthy)]);

    assert!(mux.close().is_err());
    assert_eq!(broken.closes(), 1);
    assert_eq!(healthy.closes(), 1);
}

#[test]
fn concurrent_dispatch_and_reset() {
    let first = Recorder::new(Level::Info);
    let second = Recorder::new(Level::Info);
    let mux = Arc::new(Multiplexer::new(vec![as_transport(&first)]));

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let mux = Arc::clone(&mux);
            thread::spawn(move || {
                for i in 0..250 {
                    mux.dispatch(&Entry::new(Level::Info, format!("{t}-{i}")));
                }
            })
        })
        .collect();

    mux.reset(vec![as_transport(&second)]);

    for writer in writers {
        writer.join().unwrap();
    }

    // Every entry reached exactly one of the two lists.
    assert_eq!(first.entries().len() + second.entries().len(), 1000);
}
