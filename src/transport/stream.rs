//! Pass-through to the process's standard streams.

use super::Sink;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stream {
    Stdout,
    #[default]
    Stderr,
}

impl Stream {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stream {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stdout" | "out" => Ok(Self::Stdout),
            "stderr" | "err" => Ok(Self::Stderr),
            other => Err(crate::Error::InvalidConfig(format!("unknown stream: {other}"))),
        }
    }
}

/// Writes each buffer under the stream's lock, so concurrent lines don't interleave.
/// Closing only flushes; the process owns the descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamSink(Stream);

impl StreamSink {
    #[must_use]
    pub const fn new(stream: Stream) -> Self {
        Self(stream)
    }

    #[must_use]
    pub const fn stream(&self) -> Stream {
        self.0
    }
}

impl Sink for StreamSink {
    fn write(&self, buf: &[u8]) -> Result<usize, crate::Error> {
        match self.0 {
            Stream::Stdout => io::stdout().lock().write_all(buf)?,
            Stream::Stderr => io::stderr().lock().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn close(&self) -> Result<(), crate::Error> {
        match self.0 {
            Stream::Stdout => io::stdout().flush()?,
            Stream::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }
}
