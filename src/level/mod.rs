//! Severity levels that gate which entries reach which transports.
//!
//! The ordinal counts *verbosity*: `Panic` is the smallest value and `Trace`
//! the largest. A transport's level is a ceiling, so it accepts an entry when
//! `threshold >= entry.level`: a transport at `Info` takes `Info` through
//! `Panic` and drops `Debug` and `Trace`.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Derives `Ord` on the verbosity ordinal so thresholds compare with a plain `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// Logged, then the caller is expected to unwind or abort on its own.
    Panic = 0,
    /// Logged, then the process exits through the registered exit handlers.
    Fatal = 1,
    /// Failures that prevent an operation from completing.
    Error = 2,
    /// Non-fatal anomalies that may need attention.
    Warn = 3,
    /// Normal operational milestones.
    #[default]
    Info = 4,
    /// Diagnostics too noisy for normal operation.
    Debug = 5,
    /// High-volume instrumentation.
    Trace = 6,
}

impl Level {
    /// Lowercase because config files and CLI args use lowercase level strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Panic => "panic",
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warn => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Every level from least to most verbose.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Panic,
            Self::Fatal,
            Self::Error,
            Self::Warn,
            Self::Info,
            Self::Debug,
            Self::Trace,
        ]
    }

    /// Threshold check: `true` when an entry at `level` passes a ceiling of `self`.
    #[must_use]
    pub fn allows(self, level: Self) -> bool {
        self >= level
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Out-of-range values clamp to `Trace`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Panic,
            1 => Self::Fatal,
            2 => Self::Error,
            3 => Self::Warn,
            4 => Self::Info,
            5 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl ParseLevelError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "panic" => Ok(Self::Panic),
            "fatal" => Ok(Self::Fatal),
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// A `Level` readable and writable from any thread without a lock.
#[derive(Debug)]
pub struct AtomicLevel(AtomicU8);

impl AtomicLevel {
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self(AtomicU8::new(level.as_u8()))
    }

    pub fn load(&self) -> Level {
        Level::from_u8(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, level: Level) {
        self.0.store(level.as_u8(), Ordering::Release);
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Level::default())
    }
}
