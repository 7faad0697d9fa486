//! Stepwise construction of a `Logger`: sinks, formatters and the multiplexer
//! are wired up in `build`.

use super::{ExitFn, Logger};
use crate::entry::Fields;
use crate::filelog::{Clock, FileOptions, Period, RotatingFile, SystemClock};
use crate::fmt::LineFormatter;
use crate::level::Level;
use crate::mux::Multiplexer;
use crate::transport::{
    DEFAULT_TIMESTAMP_FORMAT, Mirror, SinkTransport, Stream, StreamSink, Transport,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Transports are built in `build`, in the order they were added, so a bad
/// directory fails the build instead of the first write.
enum Slot {
    Ready(Arc<dyn Transport>),
    File(FileSpec),
    Stream(StreamSpec),
}

struct FileSpec {
    options: FileOptions,
    level: Level,
    mirror: Option<Stream>,
    timestamp_format: String,
    clock: Arc<dyn Clock>,
}

struct StreamSpec {
    stream: Stream,
    level: Level,
    timestamp_format: String,
}

pub struct LoggerBuilder {
    level: Level,
    slots: Vec<Slot>,
    fields: Fields,
    report_caller: bool,
    exit_fn: Option<ExitFn>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Defaults to `Info`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: Level::Info,
            slots: Vec::new(),
            fields: Fields::new(),
            report_caller: false,
            exit_fn: None,
        }
    }

    /// Default threshold for file and stream transports added after this call.
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn report_caller(mut self, enabled: bool) -> Self {
        self.report_caller = enabled;
        self
    }

    /// Replaces `std::process::exit` for `fatal`.
    #[must_use]
    pub fn exit_fn(mut self, exit_fn: impl Fn(i32) + Send + Sync + 'static) -> Self {
        self.exit_fn = Some(Arc::new(exit_fn));
        self
    }

    /// Adds a rotating-file transport in `dir`, named `name`.
    #[must_use]
    pub fn file(self, dir: impl Into<PathBuf>, name: impl Into<String>) -> FileBuilder {
        let spec = FileSpec {
            options: FileOptions::new(dir, name),
            level: self.level,
            mirror: None,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            clock: Arc::new(SystemClock),
        };
        FileBuilder { parent: self, spec }
    }

    /// Adds a stderr/stdout transport.
    #[must_use]
    pub fn stream(self, stream: Stream) -> StreamBuilder {
        let spec = StreamSpec {
            stream,
            level: self.level,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        };
        StreamBuilder { parent: self, spec }
    }

    /// Adds a caller-built transport.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.slots.push(Slot::Ready(transport));
        self
    }

    /// Constructs every transport, in the order added.
    ///
    /// # Errors
    /// Any file transport whose options are invalid or whose directory can't be created.
    pub fn build_transports(&mut self) -> Result<Vec<Arc<dyn Transport>>, crate::Error> {
        std::mem::take(&mut self.slots)
            .into_iter()
            .map(|slot| match slot {
                Slot::Ready(transport) => Ok(transport),
                Slot::File(spec) => build_file(spec),
                Slot::Stream(spec) => Ok(build_stream(spec)),
            })
            .collect()
    }

    /// # Errors
    /// See [`LoggerBuilder::build_transports`].
    pub fn build(mut self) -> Result<Logger, crate::Error> {
        let transports = self.build_transports()?;
        let mut logger = Logger::new(Arc::new(Multiplexer::new(transports)));
        logger.fields = self.fields;
        logger.set_report_caller(self.report_caller);
        if let Some(exit_fn) = self.exit_fn {
            logger.exit_fn = exit_fn;
        }
        Ok(logger)
    }
}

fn build_file(spec: FileSpec) -> Result<Arc<dyn Transport>, crate::Error> {
    let file = RotatingFile::with_clock(spec.options, spec.clock)?;
    let formatter = LineFormatter::new().timestamp_format(spec.timestamp_format);
    let transport: Arc<dyn Transport> = match spec.mirror {
        Some(stream) => Arc::new(
            SinkTransport::new(Mirror::new(file, StreamSink::new(stream)), spec.level)
                .with_formatter(formatter),
        ),
        None => Arc::new(SinkTransport::new(file, spec.level).with_formatter(formatter)),
    };
    Ok(transport)
}

fn build_stream(spec: StreamSpec) -> Arc<dyn Transport> {
    let formatter = LineFormatter::new().timestamp_format(spec.timestamp_format);
    Arc::new(
        SinkTransport::new(StreamSink::new(spec.stream), spec.level).with_formatter(formatter),
    )
}

/// Rotation, retention and mirroring settings for one file transport.
pub struct FileBuilder {
    parent: LoggerBuilder,
    spec: FileSpec,
}

impl FileBuilder {
    #[must_use]
    pub const fn period(mut self, period: Period) -> Self {
        self.spec.options.period = period;
        self
    }

    /// Zero keeps rotated files forever.
    #[must_use]
    pub const fn expire(mut self, expire: Duration) -> Self {
        self.spec.options.expire = expire;
        self
    }

    #[must_use]
    pub fn extension(mut self, extension: &str) -> Self {
        self.spec.options = self.spec.options.extension(extension);
        self
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.spec.level = level;
        self
    }

    /// Copies every line written to the file onto `stream`.
    #[must_use]
    pub const fn mirror(mut self, stream: Stream) -> Self {
        self.spec.mirror = Some(stream);
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.spec.timestamp_format = format.into();
        self
    }

    /// Drives rotation from `clock` instead of system time.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.spec.clock = clock;
        self
    }

    /// Sub-builder consumes self, so there must be a way back to chain more transports.
    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        self.parent.slots.push(Slot::File(self.spec));
        self.parent
    }
}

pub struct StreamBuilder {
    parent: LoggerBuilder,
    spec: StreamSpec,
}

impl StreamBuilder {
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.spec.level = level;
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.spec.timestamp_format = format.into();
        self
    }

    /// Sub-builder consumes self, so there must be a way back to chain more transports.
    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        self.parent.slots.push(Slot::Stream(self.spec));
        self.parent
    }
}
