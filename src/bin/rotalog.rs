//! `rotalog`: log from scripts into the same rotating files an application
//! writes, and inspect or sweep them.
//!
//! Usage:
//!   rotalog log <level> <message> [key=value..]   Log one message
//!   rotalog path [--at <rfc3339>]                 Print the log file path
//!   rotalog sweep                                 Delete expired log files
//!   rotalog --config <path> ...                   Use another config file

use clap::Parser;
use rotalog::cli::{Cli, Command, cmd_log, cmd_path, cmd_sweep};
use rotalog::config::Config;
use rotalog::internal;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    internal::init_with_config(&config);

    match cli.command {
        Command::Log {
            level,
            message,
            fields,
        } => cmd_log(level, &message, &fields, &config),
        Command::Path { at } => cmd_path(at.as_deref(), &config),
        Command::Sweep => cmd_sweep(&config),
    }
}
