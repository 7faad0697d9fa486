//! `rotalog` - leveled logging fanned out to level-filtered transports, with
//! period-rotated, self-expiring log files.
//!
//! - A [`Multiplexer`] delivers each [`Entry`] to every installed
//!   [`Transport`] whose threshold accepts it.
//! - A [`RotatingFile`] writes to `<dir>/<name>.<tag><ext>`, switching files
//!   when the hour or day changes and deleting files older than the retention
//!   window.
//! - [`Logger`] is the convenience API on top; [`global`] holds the
//!   process-wide default.
//!
//! Levels are ordered by verbosity (`Panic` lowest, `Trace` highest) and a
//! transport's level is a ceiling: one configured at `Info` accepts `Info`
//! through `Panic` and drops `Debug` and `Trace`.
//!
//! # Example
//!
//! ```no_run
//! use rotalog::{Level, Logger, Period, Stream};
//! use std::time::Duration;
//!
//! let logger = Logger::builder()
//!     .level(Level::Debug)
//!     .file("/var/log/myapp", "error")
//!         .period(Period::Hour)
//!         .expire(Duration::from_secs(7 * 24 * 3600))
//!         .mirror(Stream::Stderr)
//!         .done()
//!     .build()?;
//!
//! logger.info("service started");
//! logger.with_field("port", 8080).debug("listening");
//! # Ok::<(), rotalog::Error>(())
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `rotalog` command-line tool

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod filelog;
pub mod fmt;
pub mod global;
pub mod internal;
pub mod level;
pub mod logger;
pub mod mux;
pub mod transport;

pub use config::Config;
pub use entry::{Caller, Entry, Fields};
pub use error::Error;
pub use filelog::{
    Clock, FileOptions, ManualClock, Period, RotatingFile, SweepResult, SystemClock, format_size,
};
pub use fmt::{Formatter, LineFormatter};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder, register_exit_handler};
pub use mux::Multiplexer;
pub use transport::{Mirror, Sink, SinkTransport, Stream, StreamSink, Transport};
