//! Command-line interface for rotalog.
//!
//! Argument parsing uses Clap; each subcommand lives in [`commands`] and
//! returns an `ExitCode` so the binary stays a thin dispatcher.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::{cmd_log, cmd_path, cmd_sweep, parse_field};

/// Log level for CLI arguments.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[value(alias = "warning")]
    Warn,
    Error,
    Fatal,
    Panic,
}

impl From<LogLevel> for crate::level::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::Trace,
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
            LogLevel::Fatal => Self::Fatal,
            LogLevel::Panic => Self::Panic,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "rotalog", version, about = "Leveled logging into rotating, expiring files")]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log one message through the configured transports.
    Log {
        /// Severity of the message
        #[arg(value_enum)]
        level: LogLevel,
        /// Message text
        message: String,
        /// Extra fields as key=value
        #[arg(value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Print the log file path for a point in time.
    Path {
        /// RFC 3339 timestamp; defaults to now
        #[arg(long, value_name = "TIME")]
        at: Option<String>,
    },
    /// Delete rotated log files older than the configured retention.
    Sweep,
}
