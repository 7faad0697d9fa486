//! Unified error type for all rotalog operations.

use std::path::PathBuf;

/// Error type for rotalog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Construction-time validation failed (empty file name, bad directory, ...).
    InvalidConfig(String),
    /// The log directory could not be created.
    CreateDir(PathBuf, std::io::Error),
    /// Invalid log level string.
    InvalidLevel(String),
    /// Invalid duration string (e.g. retention).
    InvalidDuration(String),
    /// Formatter failed to render an entry.
    Format(String),
    /// Write attempted after the sink was closed.
    Closed,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::InvalidConfig(s) => write!(f, "invalid config: {s}"),
            Self::CreateDir(p, e) => write!(f, "cannot create {}: {e}", p.display()),
            Self::InvalidLevel(s) => write!(f, "invalid level: {s}"),
            Self::InvalidDuration(s) => write!(f, "invalid duration: {s}"),
            Self::Format(s) => write!(f, "format error: {s}"),
            Self::Closed => write!(f, "log file is closed"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::CreateDir(_, e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<crate::level::ParseLevelError> for Error {
    fn from(e: crate::level::ParseLevelError) -> Self {
        Self::InvalidLevel(e.input().to_string())
    }
}
