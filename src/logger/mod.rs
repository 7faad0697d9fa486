//! The application-facing API: level methods that build an `Entry` and hand it
//! to a shared `Multiplexer`. The builder assembles transports; `from_config`
//! does the same from a loaded `Config`.

mod builder;
mod exit;
mod from_config;

pub use builder::{FileBuilder, LoggerBuilder, StreamBuilder};
pub use exit::{register_exit_handler, run_exit_handlers};

use crate::entry::{Caller, Entry, Fields};
use crate::level::Level;
use crate::mux::Multiplexer;
use crate::transport::Transport;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Called with the exit code after a `Fatal` entry has been dispatched.
pub type ExitFn = Arc<dyn Fn(i32) + Send + Sync>;

/// Cheap to clone: clones share the multiplexer and the caller-capture flag,
/// and each carries its own inherited fields.
#[derive(Clone)]
pub struct Logger {
    mux: Arc<Multiplexer>,
    fields: Fields,
    report_caller: Arc<AtomicBool>,
    exit_fn: ExitFn,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("mux", &self.mux)
            .field("fields", &self.fields)
            .field("report_caller", &self.reports_caller())
            .finish_non_exhaustive()
    }
}

impl Logger {
    #[must_use]
    pub fn new(mux: Arc<Multiplexer>) -> Self {
        Self {
            mux,
            fields: Fields::new(),
            report_caller: Arc::new(AtomicBool::new(false)),
            exit_fn: Arc::new(|code| std::process::exit(code)),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Builds an entry from `msg` plus this logger's fields and dispatches it.
    /// Skipped entirely when no transport would accept `level`.
    #[track_caller]
    pub fn log(&self, level: Level, msg: impl Into<String>) {
        if !self.mux.is_enabled(level) {
            return;
        }

        let mut entry = Entry::new(level, msg).fields(&self.fields);
        if self.reports_caller() {
            entry = entry.caller(Caller::capture());
        }
        self.mux.dispatch(&entry);
    }

    /// Dispatches a fully built entry as-is; inherited fields are not merged.
    pub fn log_entry(&self, entry: &Entry) {
        self.mux.dispatch(entry);
    }

    #[track_caller]
    pub fn trace(&self, msg: impl Into<String>) {
        self.log(Level::Trace, msg);
    }

    #[track_caller]
    pub fn debug(&self, msg: impl Into<String>) {
        self.log(Level::Debug, msg);
    }

    #[track_caller]
    pub fn info(&self, msg: impl Into<String>) {
        self.log(Level::Info, msg);
    }

    #[track_caller]
    pub fn warn(&self, msg: impl Into<String>) {
        self.log(Level::Warn, msg);
    }

    #[track_caller]
    pub fn error(&self, msg: impl Into<String>) {
        self.log(Level::Error, msg);
    }

    /// Logs at `Fatal`, then exits with status 1 via [`Logger::exit`].
    /// Delivery failures don't prevent the exit.
    #[track_caller]
    pub fn fatal(&self, msg: impl Into<String>) {
        self.log(Level::Fatal, msg);
        self.exit(1);
    }

    /// Logs at `Panic`. Unwinding is left to the caller.
    #[track_caller]
    pub fn panic(&self, msg: impl Into<String>) {
        self.log(Level::Panic, msg);
    }

    /// Runs the registered exit handlers, then the exit function.
    pub fn exit(&self, code: i32) {
        run_exit_handlers();
        (self.exit_fn)(code);
    }

    /// A child logger that adds `key` to every entry it emits.
    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut child = self.clone();
        child.fields.insert(key.into(), value.into());
        child
    }

    #[must_use]
    pub fn with_fields(&self, fields: &Fields) -> Self {
        let mut child = self.clone();
        for (k, v) in fields {
            child.fields.insert(k.clone(), v.clone());
        }
        child
    }

    #[must_use]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Most verbose level any installed transport accepts. Lock-free.
    #[must_use]
    pub fn level(&self) -> Level {
        self.mux.level()
    }

    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.mux.is_enabled(level)
    }

    /// Applies to this logger and every clone of it.
    pub fn set_report_caller(&self, enabled: bool) {
        self.report_caller.store(enabled, Ordering::Relaxed);
    }

    #[must_use]
    pub fn reports_caller(&self) -> bool {
        self.report_caller.load(Ordering::Relaxed)
    }

    /// Swaps the transports of the shared multiplexer.
    pub fn reset(&self, transports: Vec<Arc<dyn Transport>>) {
        self.mux.reset(transports);
    }

    /// Closes every transport; later log calls are no-ops.
    ///
    /// # Errors
    /// The first transport close failure.
    pub fn close(&self) -> Result<(), crate::Error> {
        self.mux.close()
    }

    #[must_use]
    pub const fn multiplexer(&self) -> &Arc<Multiplexer> {
        &self.mux
    }

    /// Tests and diagnostics verify how many transports are installed.
    #[must_use]
    pub fn transport_count(&self) -> usize {
        self.mux.len()
    }
}
