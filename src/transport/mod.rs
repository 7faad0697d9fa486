//! The transport capability the multiplexer fans out to, and the byte sinks
//! concrete transports write into.

mod mirror;
mod stream;

pub use mirror::Mirror;
pub use stream::{Stream, StreamSink};

use crate::entry::Entry;
use crate::filelog::RotatingFile;
use crate::fmt::{Formatter, LineFormatter};
use crate::level::{AtomicLevel, Level};
use std::sync::Arc;

/// Default `LineFormatter` timestamp for transports built without an explicit formatter.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A level-filtered destination for entries. Implementations synchronize
/// internally; the multiplexer calls `deliver` from many threads at once.
pub trait Transport: Send + Sync {
    /// Most verbose level this transport accepts.
    fn threshold(&self) -> Level;

    /// # Errors
    /// The entry could not be rendered or persisted.
    fn deliver(&self, entry: &Entry) -> Result<(), crate::Error>;

    /// Releases owned resources. Must tolerate being called twice.
    ///
    /// # Errors
    /// Flushing or releasing the underlying resource failed.
    fn close(&self) -> Result<(), crate::Error>;
}

/// Shared-reference byte output.
pub trait Sink: Send + Sync {
    /// # Errors
    /// I/O failures from the underlying stream or file.
    fn write(&self, buf: &[u8]) -> Result<usize, crate::Error>;

    /// # Errors
    /// Flushing or releasing the underlying resource failed.
    fn close(&self) -> Result<(), crate::Error>;
}

impl Sink for RotatingFile {
    fn write(&self, buf: &[u8]) -> Result<usize, crate::Error> {
        Self::write(self, buf)
    }

    fn close(&self) -> Result<(), crate::Error> {
        Self::close(self)
    }
}

/// Lets a caller keep a handle on a sink (e.g. to sweep a `RotatingFile`) after handing it to a transport.
impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write(&self, buf: &[u8]) -> Result<usize, crate::Error> {
        (**self).write(buf)
    }

    fn close(&self) -> Result<(), crate::Error> {
        (**self).close()
    }
}

/// Formats each accepted entry and writes it to a `Sink`.
pub struct SinkTransport<S> {
    sink: S,
    level: AtomicLevel,
    formatter: Box<dyn Formatter>,
}

impl<S: Sink> SinkTransport<S> {
    #[must_use]
    pub fn new(sink: S, level: Level) -> Self {
        Self {
            sink,
            level: AtomicLevel::new(level),
            formatter: Box::new(LineFormatter::new().timestamp_format(DEFAULT_TIMESTAMP_FORMAT)),
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// A multiplexer caches the maximum level at `reset`; call `reset` again after changing this.
    pub fn set_level(&self, level: Level) {
        self.level.store(level);
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: Sink> Transport for SinkTransport<S> {
    fn threshold(&self) -> Level {
        self.level.load()
    }

    fn deliver(&self, entry: &Entry) -> Result<(), crate::Error> {
        let bytes = self.formatter.format(entry)?;
        self.sink.write(&bytes)?;
        Ok(())
    }

    fn close(&self) -> Result<(), crate::Error> {
        self.sink.close()
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for SinkTransport<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkTransport")
            .field("sink", &self.sink)
            .field("level", &self.level.load())
            .finish_non_exhaustive()
    }
}
