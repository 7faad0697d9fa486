//! rotalog's own diagnostic logger, plus the counter every swallowed
//! housekeeping or fan-out failure is recorded in.
//!
//! Uses `OnceLock` so the logger is initialized exactly once, even if
//! multiple entry points race to call `init`. It only ever writes to stderr,
//! so reporting a file problem can't re-enter that file's lock.

use crate::config::Config;
use crate::entry::Entry;
use crate::level::Level;
use crate::logger::Logger;
use crate::mux::Multiplexer;
use crate::transport::{SinkTransport, Stream, StreamSink, Transport};
use std::cell::Cell;
use std::sync::{Arc, OnceLock};
use std::sync::atomic::{AtomicU64, Ordering};

static INTERNAL_LOGGER: OnceLock<Logger> = OnceLock::new();
static FAILURES: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static IN_INTERNAL: Cell<bool> = const { Cell::new(false) };
}

/// Enables diagnostics on stderr at `level`. Later calls are no-ops.
pub fn init(level: Level) {
    let was_init = INTERNAL_LOGGER.get().is_some();
    INTERNAL_LOGGER.get_or_init(|| build_internal_logger(level));
    if !was_init {
        debug("INTERNAL", &format!("Internal logger ready (level={level})"));
    }
}

/// Same as `init`, taking the level from `general.internal_level`.
pub fn init_with_config(config: &Config) {
    init(config.internal_level());
}

fn build_internal_logger(level: Level) -> Logger {
    let stderr: Arc<dyn Transport> =
        Arc::new(SinkTransport::new(StreamSink::new(Stream::Stderr), level));
    Logger::new(Arc::new(Multiplexer::new(vec![stderr])))
}

/// Calls before `init` are dropped.
/// Re-entrant calls (the internal logger reporting its own failure) are dropped.
fn log(level: Level, scope: &str, msg: &str) {
    let Some(logger) = INTERNAL_LOGGER.get() else {
        return;
    };
    IN_INTERNAL.with(|busy| {
        if busy.replace(true) {
            return;
        }
        logger.log_entry(&Entry::new(level, msg).field("scope", scope));
        busy.set(false);
    });
}

/// Counts a swallowed failure and reports it at `Warn`.
pub fn record_failure(scope: &str, msg: &str) {
    FAILURES.fetch_add(1, Ordering::Relaxed);
    log(Level::Warn, scope, msg);
}

/// Failures swallowed since process start: rotation closes, sweep errors,
/// transport delivery and close errors, mirror copy errors.
#[must_use]
pub fn failure_count() -> u64 {
    FAILURES.load(Ordering::Relaxed)
}

pub fn trace(scope: &str, msg: &str) {
    log(Level::Trace, scope, msg);
}

pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
